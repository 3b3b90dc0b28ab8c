//! In-memory registry of promotion candidates for one build.
//!
//! Registration order is the tie-break for candidates with equal produced
//! paths. Callers running producers in parallel must funnel registrations
//! through the registry's single owner (or a lock around it).

use anyhow::Result;
use tracing::debug;

use crate::core::candidate::Candidate;
use crate::core::paths::{BuildPath, SourcePath, strip_sandbox};
use crate::io::layout::WorkspacePaths;
use crate::io::staging::move_into_staging;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    candidates: Vec<Candidate>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that will still exist at `produced` when promotion runs.
    pub fn register_direct(&mut self, target: SourcePath, produced: BuildPath) {
        debug!(dst = %target, produced = %produced, "registered promotion");
        self.candidates.push(Candidate::direct(target, produced));
    }

    /// Move a transient file into staging, then record it.
    ///
    /// `produced` may sit inside `sandbox`; the recorded produced path has the
    /// sandbox root stripped so it names the file's place in the build tree.
    pub fn register_via_staging(
        &mut self,
        paths: &WorkspacePaths,
        target: SourcePath,
        produced: BuildPath,
        sandbox: Option<&BuildPath>,
    ) -> Result<()> {
        let staged = move_into_staging(paths, &produced, &target)?;
        let produced = strip_sandbox(&produced, sandbox);
        debug!(
            dst = %target,
            produced = %produced,
            staged = %staged,
            "registered staged promotion"
        );
        self.candidates
            .push(Candidate::staged(target, produced, staged));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.candidates.clear();
    }

    /// Drain all candidates, leaving the registry empty.
    pub fn take(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.candidates)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
