//! Atomic file writes.
//!
//! Every file folio produces (manifests, `.mdhtml` bodies, video maps) goes
//! through the same protocol:
//!
//! 1. Ensure the parent directory exists.
//! 2. Write to `<path>.folio.tmp`.
//! 3. Rename to the final path (atomic on POSIX).
//! 4. On rename failure, remove the `.tmp` and leave the original untouched.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Outcome of a content-gated write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: on-disk content already matches.
    Unchanged { path: PathBuf },
    /// Dry run: the file would be written but was left alone.
    WouldWrite { path: PathBuf },
}

/// Replace `path` with `content` in one rename.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.folio.tmp", path.display()));
    write_atomic_with_tmp(path, content, &tmp)
}

fn write_atomic_with_tmp(path: &Path, content: &[u8], tmp: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Whether writing `content` to `path` would change the file.
pub(crate) fn would_change(path: &Path, content: &[u8]) -> Result<bool, SyncError> {
    match std::fs::read(path) {
        Ok(existing) => Ok(existing != content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(true),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Compare `content` against disk without writing.
pub(crate) fn check_if_changed(path: &Path, content: &[u8]) -> Result<WriteResult, SyncError> {
    let path = path.to_path_buf();
    if would_change(&path, content)? {
        Ok(WriteResult::WouldWrite { path })
    } else {
        Ok(WriteResult::Unchanged { path })
    }
}

/// Write `content` only if it differs from what is already on disk.
pub(crate) fn write_if_changed(path: &Path, content: &[u8]) -> Result<WriteResult, SyncError> {
    if !would_change(path, content)? {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    write_atomic(path, content)?;
    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
