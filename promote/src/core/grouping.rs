//! Deterministic grouping of candidates by target and selection planning.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::candidate::Candidate;
use crate::core::paths::SourcePath;

/// Candidates keyed by destination, each group sorted by produced path.
pub type TargetGroups = BTreeMap<SourcePath, Vec<Candidate>>;

/// One unit of work in a promotion run, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Promote the first candidate, report the rest as ignored.
    Promote {
        target: SourcePath,
        candidates: Vec<Candidate>,
    },
    /// A requested target with nothing registered for it.
    Missing(SourcePath),
}

/// Ordered steps plus the candidates left for a later run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub residual: Vec<Candidate>,
}

/// Group candidates by `target_path`.
///
/// Within a group, candidates are ordered by `produced_path` compared as plain
/// strings; the first one wins promotion. The sort is stable, so candidates
/// with equal produced paths keep their registration order.
pub fn group_by_target(candidates: impl IntoIterator<Item = Candidate>) -> TargetGroups {
    let mut groups = TargetGroups::new();
    for candidate in candidates {
        groups
            .entry(candidate.target_path.clone())
            .or_default()
            .push(candidate);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.produced_path.lexical_cmp(&b.produced_path));
    }
    groups
}

/// Flatten groups back into a candidate list, in target order.
pub fn flatten(groups: TargetGroups) -> Vec<Candidate> {
    groups.into_values().flatten().collect()
}

/// Plan promotion of every group; nothing is left over.
pub fn plan_all(groups: TargetGroups) -> Plan {
    let steps = groups
        .into_iter()
        .map(|(target, candidates)| PlanStep::Promote { target, candidates })
        .collect();
    Plan {
        steps,
        residual: Vec::new(),
    }
}

/// Plan promotion of the requested targets only.
///
/// Requests are treated as a set: duplicates collapse and processing follows
/// target order, not request order. Groups that were not requested become the
/// residual.
pub fn plan_selected(
    mut groups: TargetGroups,
    requested: impl IntoIterator<Item = SourcePath>,
) -> Plan {
    let requested: BTreeSet<SourcePath> = requested.into_iter().collect();
    let mut steps = Vec::with_capacity(requested.len());
    for target in requested {
        match groups.remove(&target) {
            Some(candidates) => steps.push(PlanStep::Promote { target, candidates }),
            None => steps.push(PlanStep::Missing(target)),
        }
    }
    Plan {
        steps,
        residual: flatten(groups),
    }
}
