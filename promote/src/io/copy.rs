//! Whole-file overwrite of a source file with a build output.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

/// Replace `dst` with a copy of `src`, leaving `dst` owner-writable.
///
/// Any existing `dst` is removed first. The copy keeps the source mode plus
/// owner-write (`mode | 0o200`), so a read-only build output never produces a
/// read-only source file. Missing parent directories of `dst` are created.
pub fn promote_file(src: &Path, dst: &Path) -> Result<()> {
    remove_if_exists(dst)?;
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::copy(src, dst).with_context(|| format!("copy {} to {}", src.display(), dst.display()))?;
    make_owner_writable(dst)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}

fn make_owner_writable(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = perms.mode();
        if mode & 0o200 == 0 {
            perms.set_mode(mode | 0o200);
            fs::set_permissions(path, perms)
                .with_context(|| format!("chmod {}", path.display()))?;
        }
    }
    #[cfg(not(unix))]
    {
        if perms.readonly() {
            perms.set_readonly(false);
            fs::set_permissions(path, perms)
                .with_context(|| format!("clear read-only {}", path.display()))?;
        }
    }
    Ok(())
}
