//! Output guard.
//!
//! Every file envsnap writes goes through here. Plaintext is only ever
//! written owner-only, and an existing path is never replaced unless the
//! caller passed `--force`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{OutputError, Result};

/// Fail early if `path` exists and `force` was not requested.
///
/// Commands call this before prompting or touching the network so a refusal
/// costs nothing. The writers below re-check atomically.
pub fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Err(OutputError::Exists(path.to_path_buf()).into());
    }
    Ok(())
}

/// Write decrypted plaintext with mode 0600.
///
/// The data goes to a temp file next to `path` and is renamed into place,
/// so a failure never leaves a partial file behind. Without `force` the
/// rename refuses to replace an existing file.
pub fn write_plaintext(path: &Path, contents: &[u8], force: bool) -> Result<()> {
    ensure_writable(path, force)?;
    let tmp = stage(path, contents)?;

    let persisted = if force {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            OutputError::Exists(path.to_path_buf())
        } else {
            write_failed(path, e.error)
        }
    })?;

    check_private(path);
    debug!(path = %path.display(), bytes = contents.len(), "plaintext written");
    Ok(())
}

/// Write an encrypted bundle. Ciphertext keeps default permissions.
pub fn write_bundle(path: &Path, contents: &[u8], force: bool) -> Result<()> {
    ensure_writable(path, force)?;

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            OutputError::Exists(path.to_path_buf())
        } else {
            write_failed(path, e)
        }
    })?;
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| write_failed(path, e))?;

    debug!(path = %path.display(), bytes = contents.len(), "bundle written");
    Ok(())
}

/// Atomically replace `path` with owner-only contents.
///
/// Used for envsnap's own state files (key cache, token, project config),
/// which are always rewritten whole.
pub fn write_private_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = stage(path, contents)?;
    tmp.persist(path).map_err(|e| write_failed(path, e.error))?;
    Ok(())
}

/// Write `contents` to a synced 0600 temp file in the destination directory.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".envsnap-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_failed(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| write_failed(path, e))?;
    }

    tmp.write_all(contents)
        .and_then(|_| tmp.flush())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| write_failed(path, e))?;

    Ok(tmp)
}

#[cfg(unix)]
fn check_private(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = fs::metadata(path) {
        let mode = meta.permissions().mode() & 0o777;
        if mode != 0o600 {
            warn!(path = %path.display(), mode = %format!("{:o}", mode), "plaintext is not owner-only");
        }
    }
}

#[cfg(not(unix))]
fn check_private(_path: &Path) {}

fn write_failed(path: &Path, source: io::Error) -> OutputError {
    OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}
