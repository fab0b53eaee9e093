//! File deletion.

use std::fs;
use std::io;
use std::path::Path;

use crate::Result;
use crate::SandboxError;
use crate::types::work_dir::is_writable;

/// Deletes a file.
///
/// The path must denote an existing regular file the process may write;
/// directories are refused so a mistyped path cannot take a subtree with
/// it.
///
/// # Errors
///
/// Returns [`SandboxError::Io`] if the file does not exist, is not a
/// regular file, is not writable, or the unlink itself fails.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::delete_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// delete_file("/srv/files/data/stale.tmp")?;
/// # Ok(())
/// # }
/// ```
pub fn delete_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SandboxError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file does not exist: {}", path.display()),
        )));
    }

    if !path.is_file() {
        return Err(SandboxError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path is not a regular file: {}", path.display()),
        )));
    }

    if !is_writable(path) {
        return Err(SandboxError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("file is not writable: {}", path.display()),
        )));
    }

    fs::remove_file(path).map_err(|e| {
        SandboxError::Io(io::Error::new(
            e.kind(),
            format!("failed to delete {}: {e}", path.display()),
        ))
    })
}
