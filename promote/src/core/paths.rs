//! Build-space and source-space path types.
//!
//! Both types hold clean relative paths: `BuildPath` is relative to the build
//! directory, `SourcePath` is relative to the project root. Joining them onto
//! a concrete root happens in `io::layout`.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Location inside the build directory (e.g. `default/gen/x.ml`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildPath(PathBuf);

/// Location inside the source tree (e.g. `src/x.ml`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(PathBuf);

impl BuildPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Normalize user or ledger input, rejecting absolute paths and `..`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        normalize_relative(path.as_ref(), "build path").map(Self)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, rest: impl AsRef<Path>) -> Self {
        Self(self.0.join(rest))
    }

    /// Compare by the raw path string, byte by byte.
    ///
    /// Unlike the derived `Ord`, which compares component by component, this
    /// puts `a-b/y.txt` before `a/y.txt` because `-` sorts below `/`.
    pub fn lexical_cmp(&self, other: &Self) -> Ordering {
        self.0.as_os_str().cmp(other.0.as_os_str())
    }
}

impl SourcePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Normalize user or ledger input, rejecting absolute paths and `..`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        normalize_relative(path.as_ref(), "source path").map(Self)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for BuildPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Drop a sandbox root prefix from a build path.
///
/// A file produced at `.sandbox/abc/default/x.ml` under sandbox root
/// `.sandbox/abc` is recorded as `default/x.ml`. Paths outside the sandbox,
/// or calls without a sandbox, return the path unchanged.
pub fn strip_sandbox(path: &BuildPath, sandbox: Option<&BuildPath>) -> BuildPath {
    match sandbox {
        Some(root) => match path.0.strip_prefix(&root.0) {
            Ok(rest) if !rest.as_os_str().is_empty() => BuildPath(rest.to_path_buf()),
            _ => path.clone(),
        },
        None => path.clone(),
    }
}

fn normalize_relative(path: &Path, kind: &str) -> Result<PathBuf> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("{kind} must be relative and stay inside its root: {}", path.display())
            }
        }
    }
    if clean.as_os_str().is_empty() {
        bail!("{kind} is empty: {:?}", path.display().to_string());
    }
    Ok(clean)
}
