//! Deferred promotion of files registered by the last build.
//!
//! Backs `promote apply` and `promote list`: load the ledger, promote all or a
//! subset, and write back whatever was not selected.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::console::Reporter;
use crate::core::candidate::Candidate;
use crate::core::paths::SourcePath;
use crate::engine::{PromotionOutcome, Selection, promote};
use crate::io::layout::WorkspacePaths;
use crate::io::ledger::{load_ledger, save_ledger};

/// Promote candidates recorded by the last build.
///
/// The residual is persisted only after the whole run succeeded; on error the
/// ledger keeps its previous contents.
pub fn apply_last_run(
    paths: &WorkspacePaths,
    selection: Selection<'_>,
    reporter: &mut dyn Reporter,
) -> Result<PromotionOutcome> {
    let candidates = load_ledger(&paths.ledger_path).context("load promotion ledger")?;
    let outcome = promote(paths, candidates, selection, reporter)?;
    save_ledger(&paths.ledger_path, &outcome.residual).context("save promotion ledger")?;
    info!(
        promoted = outcome.promoted.len(),
        remaining = outcome.residual.len(),
        "promotion applied"
    );
    Ok(outcome)
}

/// Candidates waiting in the ledger, in stored order.
pub fn pending(paths: &WorkspacePaths) -> Result<Vec<Candidate>> {
    load_ledger(&paths.ledger_path).context("load promotion ledger")
}

/// Turn a user-supplied target into a source path.
///
/// Absolute paths must point inside the project root. `root` is canonical, so
/// an absolute target that does not start with it literally (for example one
/// spelled through a symlink) is compared again after resolving its existing
/// ancestors.
pub fn parse_target(root: &Path, raw: &Path) -> Result<SourcePath> {
    if !raw.is_absolute() {
        return SourcePath::parse(raw);
    }
    if let Ok(relative) = raw.strip_prefix(root) {
        return SourcePath::parse(relative);
    }
    let resolved = resolve_existing_ancestor(raw);
    let relative = resolved
        .strip_prefix(root)
        .with_context(|| format!("{} is outside the project root", raw.display()))?;
    SourcePath::parse(relative)
}

/// Canonicalize the deepest ancestor of `path` that exists and re-attach the
/// remaining components. The target file itself need not exist yet.
fn resolve_existing_ancestor(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        let (Ok(real), Ok(rest)) = (ancestor.canonicalize(), path.strip_prefix(ancestor)) else {
            continue;
        };
        if rest.as_os_str().is_empty() {
            return real;
        }
        return real.join(rest);
    }
    path.to_path_buf()
}
