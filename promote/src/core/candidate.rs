//! Promotion candidates: one pending "copy this file into the source tree".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::paths::{BuildPath, SourcePath};

/// A file that could be promoted into the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Where the file was produced, with any sandbox prefix stripped.
    pub produced_path: BuildPath,
    /// Stable copy under the staging area, set when the file was relocated.
    pub staged_path: Option<BuildPath>,
    /// Destination in the source tree. Several candidates may share it.
    pub target_path: SourcePath,
}

impl Candidate {
    pub fn direct(target_path: SourcePath, produced_path: BuildPath) -> Self {
        Self {
            produced_path,
            staged_path: None,
            target_path,
        }
    }

    pub fn staged(
        target_path: SourcePath,
        produced_path: BuildPath,
        staged_path: BuildPath,
    ) -> Self {
        Self {
            produced_path,
            staged_path: Some(staged_path),
            target_path,
        }
    }

    /// The file read at promotion time: the staged copy if any, else the
    /// produced file.
    pub fn correction_file(&self) -> &BuildPath {
        self.staged_path.as_ref().unwrap_or(&self.produced_path)
    }

    pub fn is_staged(&self) -> bool {
        self.staged_path.is_some()
    }

    /// Re-normalize every path, rejecting entries that escape their root.
    pub fn validated(self) -> Result<Self> {
        let produced_path = BuildPath::parse(self.produced_path.as_path())
            .context("invalid produced_path")?;
        let staged_path = match self.staged_path {
            Some(staged) => {
                Some(BuildPath::parse(staged.as_path()).context("invalid staged_path")?)
            }
            None => None,
        };
        let target_path =
            SourcePath::parse(self.target_path.as_path()).context("invalid target_path")?;
        Ok(Self {
            produced_path,
            staged_path,
            target_path,
        })
    }
}
