//! Promotion engine: select, deduplicate by target, copy winners into the
//! source tree.

use anyhow::Result;
use tracing::{debug, info};

use crate::console::{PromotionEvent, Reporter};
use crate::core::candidate::Candidate;
use crate::core::grouping::{PlanStep, group_by_target, plan_all, plan_selected};
use crate::core::paths::SourcePath;
use crate::io::copy::promote_file;
use crate::io::layout::WorkspacePaths;

/// Which targets a promotion run should handle.
pub enum Selection<'a> {
    /// Every registered target.
    All,
    /// Only these targets. `on_missing` is called once for each requested
    /// target that has no candidate.
    Only {
        targets: Vec<SourcePath>,
        on_missing: &'a mut dyn FnMut(&SourcePath),
    },
}

/// Result of a completed promotion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionOutcome {
    /// Targets whose source file was overwritten, in processing order.
    pub promoted: Vec<SourcePath>,
    /// Candidates that were not selected and should be persisted again.
    pub residual: Vec<Candidate>,
}

/// Promote `candidates` according to `selection`.
///
/// Informational conditions (missing correction file, ignored duplicates,
/// unknown requested targets) never stop the run. The first filesystem error
/// aborts it and is returned unchanged; the caller must not persist anything
/// in that case.
pub fn promote(
    paths: &WorkspacePaths,
    candidates: Vec<Candidate>,
    selection: Selection<'_>,
    reporter: &mut dyn Reporter,
) -> Result<PromotionOutcome> {
    let groups = group_by_target(candidates);
    let (plan, mut on_missing) = match selection {
        Selection::All => (plan_all(groups), None),
        Selection::Only {
            targets,
            on_missing,
        } => (plan_selected(groups, targets), Some(on_missing)),
    };
    debug!(
        steps = plan.steps.len(),
        residual = plan.residual.len(),
        "promotion planned"
    );

    let mut promoted = Vec::new();
    for step in plan.steps {
        match step {
            PlanStep::Promote { target, candidates } => {
                if promote_target(paths, &target, &candidates, reporter)? {
                    promoted.push(target);
                }
            }
            PlanStep::Missing(target) => {
                debug!(dst = %target, "requested target has no candidate");
                if let Some(callback) = on_missing.as_deref_mut() {
                    callback(&target);
                }
            }
        }
    }

    Ok(PromotionOutcome {
        promoted,
        residual: plan.residual,
    })
}

/// Promote the first candidate of a sorted group; report the others.
///
/// Returns whether the target file was written.
fn promote_target(
    paths: &WorkspacePaths,
    target: &SourcePath,
    candidates: &[Candidate],
    reporter: &mut dyn Reporter,
) -> Result<bool> {
    let Some((winner, others)) = candidates.split_first() else {
        return Ok(false);
    };

    let correction = paths.build_file(winner.correction_file());
    let from = paths.display_build(&winner.produced_path);
    let written = if correction.exists() {
        reporter.report(&PromotionEvent::Promoted {
            from,
            to: target.clone(),
        });
        promote_file(&correction, &paths.source_file(target))?;
        info!(dst = %target, correction = %correction.display(), "promoted");
        true
    } else {
        reporter.report(&PromotionEvent::Skipped {
            from,
            to: target.clone(),
            staged: winner.is_staged(),
        });
        false
    };

    for other in others {
        reporter.report(&PromotionEvent::Ignored {
            from: paths.display_build(&other.produced_path),
        });
    }
    Ok(written)
}
