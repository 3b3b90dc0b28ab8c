//! User-facing promotion messages.
//!
//! These lines are product output, unlike the `tracing` diagnostics in
//! [`crate::logging`]. The engine emits them through [`Reporter`] so commands
//! print them and tests record them.

use std::fmt;
use std::path::PathBuf;

use crate::core::paths::SourcePath;

/// Something the engine tells the user about a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionEvent {
    /// The winning candidate was copied to its target.
    Promoted { from: PathBuf, to: SourcePath },
    /// The winning candidate's correction file no longer exists.
    Skipped {
        from: PathBuf,
        to: SourcePath,
        staged: bool,
    },
    /// A losing candidate for a target that had several.
    Ignored { from: PathBuf },
}

impl fmt::Display for PromotionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Promoted { from, to } => write!(f, "Promoting {} to {}.", from.display(), to),
            Self::Skipped { from, to, staged } => write!(
                f,
                "Skipping promotion of {} to {} as the {} is missing.",
                from.display(),
                to,
                if *staged { "staging file" } else { "file" }
            ),
            Self::Ignored { from } => write!(f, " -> ignored {}.", from.display()),
        }
    }
}

/// Sink for promotion events.
pub trait Reporter {
    fn report(&mut self, event: &PromotionEvent);
}

/// Prints each event on its own stdout line.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &PromotionEvent) {
        println!("{event}");
    }
}
