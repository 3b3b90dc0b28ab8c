//! Staging area for files that must outlive the place they were produced in.
//!
//! Staged files live under `<build_dir>/.promotion-staging/`, mirroring the
//! source-relative path they will eventually be promoted to. Nothing here
//! garbage-collects them; a file that is never promoted stays until the build
//! directory is cleaned.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::paths::{BuildPath, SourcePath};
use crate::io::layout::{STAGING_DIR_NAME, WorkspacePaths};

/// Staged location for a source-relative path.
pub fn staged_path(source: &SourcePath) -> BuildPath {
    BuildPath::new(Path::new(STAGING_DIR_NAME).join(source.as_path()))
}

/// Move `from` into the staging area and return its staged location.
///
/// Uses a plain rename, so moving across filesystems fails and the error is
/// returned as-is. An existing staged file for the same source is replaced.
pub fn move_into_staging(
    paths: &WorkspacePaths,
    from: &BuildPath,
    source: &SourcePath,
) -> Result<BuildPath> {
    let staged = staged_path(source);
    let from_abs = paths.build_file(from);
    let staged_abs = paths.build_file(&staged);
    if let Some(parent) = staged_abs.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create staging directory {}", parent.display()))?;
    }
    fs::rename(&from_abs, &staged_abs).with_context(|| {
        format!(
            "move {} into staging at {}",
            from_abs.display(),
            staged_abs.display()
        )
    })?;
    debug!(from = %from, staged = %staged, "staged file");
    Ok(staged)
}
