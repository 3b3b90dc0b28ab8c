//! Test-only helpers: throwaway project workspaces and a recording reporter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::console::{PromotionEvent, Reporter};
use crate::core::paths::{BuildPath, SourcePath};
use crate::io::layout::WorkspacePaths;

/// A project root in a temp dir with a build directory named `build_dir`.
pub struct TestWorkspace {
    _temp: TempDir,
    paths: WorkspacePaths,
}

impl TestWorkspace {
    pub fn new(build_dir: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let paths = WorkspacePaths::new(temp.path(), build_dir);
        fs::create_dir_all(&paths.build_dir)
            .with_context(|| format!("create {}", paths.build_dir.display()))?;
        Ok(Self { _temp: temp, paths })
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn paths(&self) -> &WorkspacePaths {
        &self.paths
    }

    /// Write a file under the build directory and return its build path.
    pub fn write_build(&self, rel: &str, contents: &str) -> Result<BuildPath> {
        let path = BuildPath::new(rel);
        write_file(&self.paths.build_file(&path), contents)?;
        Ok(path)
    }

    pub fn remove_build(&self, rel: &str) -> Result<()> {
        let abs = self.paths.build_file(&BuildPath::new(rel));
        fs::remove_file(&abs).with_context(|| format!("remove {}", abs.display()))
    }

    pub fn write_source(&self, rel: &str, contents: &str) -> Result<()> {
        write_file(&self.paths.source_file(&SourcePath::new(rel)), contents)
    }

    pub fn read_source(&self, rel: &str) -> Result<String> {
        let abs = self.paths.source_file(&SourcePath::new(rel));
        fs::read_to_string(&abs).with_context(|| format!("read {}", abs.display()))
    }

    pub fn source_exists(&self, rel: &str) -> bool {
        self.paths.source_file(&SourcePath::new(rel)).exists()
    }

    #[cfg(unix)]
    pub fn source_mode(&self, rel: &str) -> Result<u32> {
        use std::os::unix::fs::PermissionsExt;

        let abs = self.paths.source_file(&SourcePath::new(rel));
        let meta = fs::metadata(&abs).with_context(|| format!("stat {}", abs.display()))?;
        Ok(meta.permissions().mode())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Collects every reported event.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<PromotionEvent>,
}

impl RecordingReporter {
    /// Events rendered the way the console prints them.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &PromotionEvent) {
        self.events.push(event.clone());
    }
}
