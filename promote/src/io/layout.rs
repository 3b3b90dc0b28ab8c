//! Canonical locations inside a project and its build directory.

use std::path::PathBuf;

use crate::core::paths::{BuildPath, SourcePath};

/// Build directory used when neither config nor CLI names one.
pub const DEFAULT_BUILD_DIR: &str = "_build";
/// Ledger of candidates left unpromoted by the last build.
pub const LEDGER_FILE_NAME: &str = ".to-promote";
/// Staging root, relative to the build directory.
pub const STAGING_DIR_NAME: &str = ".promotion-staging";
/// Project configuration, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "promote.toml";

/// All canonical paths for a project root and build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    /// Build directory as configured, relative to `root`. Used for display.
    pub build_dir_name: PathBuf,
    pub build_dir: PathBuf,
    pub ledger_path: PathBuf,
    pub staging_dir: PathBuf,
    pub config_path: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>, build_dir_name: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let build_dir_name = build_dir_name.into();
        let build_dir = root.join(&build_dir_name);
        Self {
            ledger_path: build_dir.join(LEDGER_FILE_NAME),
            staging_dir: build_dir.join(STAGING_DIR_NAME),
            config_path: root.join(CONFIG_FILE_NAME),
            root,
            build_dir_name,
            build_dir,
        }
    }

    /// Absolute (or root-relative) location of a build-space path.
    pub fn build_file(&self, path: &BuildPath) -> PathBuf {
        self.build_dir.join(path.as_path())
    }

    /// Absolute (or root-relative) location of a source-space path.
    pub fn source_file(&self, path: &SourcePath) -> PathBuf {
        self.root.join(path.as_path())
    }

    /// Build-space path as users see it, prefixed with the build directory name.
    pub fn display_build(&self, path: &BuildPath) -> PathBuf {
        self.build_dir_name.join(path.as_path())
    }
}
