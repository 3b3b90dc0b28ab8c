//! Ledger of pending promotions (`<build_dir>/.to-promote`).
//!
//! The file is a JSON envelope `{"version": N, "payload": [...]}`. Readers
//! reject any version other than [`LEDGER_VERSION`]; there is no migration.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::candidate::Candidate;

/// Bumped on any incompatible change to the candidate record.
pub const LEDGER_VERSION: u32 = 2;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    payload: &'a [Candidate],
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: u32,
    payload: Value,
}

/// Load pending candidates. A missing ledger is an empty list.
pub fn load_ledger(path: &Path) -> Result<Vec<Candidate>> {
    debug!(path = %path.display(), "loading ledger");
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err).with_context(|| format!("read ledger {}", path.display())),
    };
    let raw: RawEnvelope = serde_json::from_str(&contents)
        .with_context(|| format!("parse ledger {}", path.display()))?;
    if raw.version != LEDGER_VERSION {
        bail!(
            "unsupported ledger version {} in {} (expected {})",
            raw.version,
            path.display(),
            LEDGER_VERSION
        );
    }
    let candidates: Vec<Candidate> = serde_json::from_value(raw.payload)
        .with_context(|| format!("deserialize ledger payload {}", path.display()))?;
    let candidates = candidates
        .into_iter()
        .map(Candidate::validated)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("validate ledger {}", path.display()))?;
    debug!(count = candidates.len(), "ledger loaded");
    Ok(candidates)
}

/// Persist pending candidates, or delete the ledger when there are none.
pub fn save_ledger(path: &Path, candidates: &[Candidate]) -> Result<()> {
    if candidates.is_empty() {
        debug!(path = %path.display(), "removing empty ledger");
        return match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove ledger {}", path.display())),
        };
    }
    debug!(path = %path.display(), count = candidates.len(), "writing ledger");
    let envelope = Envelope {
        version: LEDGER_VERSION,
        payload: candidates,
    };
    let mut buf = serde_json::to_string_pretty(&envelope).context("serialize ledger")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("ledger path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp ledger {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace ledger {}", path.display()))?;
    Ok(())
}
