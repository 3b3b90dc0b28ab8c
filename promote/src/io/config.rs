//! Project configuration stored in `promote.toml` at the project root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::io::layout::DEFAULT_BUILD_DIR;

/// What the end-of-build hook does with registered candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionMode {
    /// Promote everything as soon as the build finishes.
    Automatic,
    /// Only persist the ledger; promotion happens in a later `promote apply`.
    Never,
}

/// Project configuration (TOML).
///
/// Missing fields take their defaults. An unset `mode` behaves like
/// `never` at the end of a build.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromoteConfig {
    /// Build directory, relative to the project root.
    pub build_dir: PathBuf,

    pub mode: Option<PromotionMode>,
}

impl Default for PromoteConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            mode: None,
        }
    }
}

impl PromoteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.build_dir.as_os_str().is_empty() {
            return Err(anyhow!("build_dir must not be empty"));
        }
        let escapes = self
            .build_dir
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(anyhow!(
                "build_dir must be a relative path inside the project: {}",
                self.build_dir.display()
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `PromoteConfig::default()`.
pub fn load_config(path: &Path) -> Result<PromoteConfig> {
    if !path.exists() {
        let cfg = PromoteConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PromoteConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
