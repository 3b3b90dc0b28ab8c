//! Build lifecycle around the promotion registry.
//!
//! A build engine owns one `BuildSession`. It calls [`BuildSession::begin`]
//! when a build starts, registers candidates while rules run, and calls
//! [`BuildSession::finish`] once the build ends, successful or not. `finish`
//! either promotes everything (automatic mode) or writes the ledger for a later
//! `promote apply`.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::console::Reporter;
use crate::core::paths::{BuildPath, SourcePath};
use crate::engine::{Selection, promote};
use crate::io::config::PromotionMode;
use crate::io::layout::WorkspacePaths;
use crate::io::ledger::save_ledger;
use crate::registry::Registry;

/// What happened to the registered candidates at the end of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    /// Automatic mode promoted these targets.
    Promoted(Vec<SourcePath>),
    /// Candidates were written to the ledger (zero means it was removed).
    Persisted { pending: usize },
}

#[derive(Debug)]
pub struct BuildSession {
    paths: WorkspacePaths,
    mode: Option<PromotionMode>,
    registry: Registry,
}

impl BuildSession {
    pub fn new(paths: WorkspacePaths, mode: Option<PromotionMode>) -> Self {
        Self {
            paths,
            mode,
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Start a build: drop anything a previous build left registered.
    pub fn begin(&mut self) {
        if !self.registry.is_empty() {
            debug!(
                stale = self.registry.len(),
                "dropping candidates from previous build"
            );
        }
        self.registry.reset();
    }

    pub fn register_direct(&mut self, target: SourcePath, produced: BuildPath) {
        self.registry.register_direct(target, produced);
    }

    pub fn register_via_staging(
        &mut self,
        target: SourcePath,
        produced: BuildPath,
        sandbox: Option<&BuildPath>,
    ) -> Result<()> {
        self.registry
            .register_via_staging(&self.paths, target, produced, sandbox)
    }

    /// End-of-build hook.
    ///
    /// The registry is emptied before any promotion or persistence happens, so
    /// candidates never carry over into the next build even when this fails.
    /// A failed automatic promotion leaves the ledger untouched.
    pub fn finish(&mut self, reporter: &mut dyn Reporter) -> Result<FinishOutcome> {
        let candidates = self.registry.take();
        match self.mode {
            Some(PromotionMode::Automatic) => {
                info!(count = candidates.len(), "promoting automatically");
                let outcome = promote(&self.paths, candidates, Selection::All, reporter)
                    .context("automatic promotion")?;
                save_ledger(&self.paths.ledger_path, &[])?;
                Ok(FinishOutcome::Promoted(outcome.promoted))
            }
            Some(PromotionMode::Never) | None => {
                let pending = candidates.len();
                save_ledger(&self.paths.ledger_path, &candidates)?;
                debug!(pending, "promotion ledger updated");
                Ok(FinishOutcome::Persisted { pending })
            }
        }
    }
}
