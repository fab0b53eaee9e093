//! Validated writable directory type.

use crate::Result;
use crate::SandboxError;
use std::path::Path;
use std::path::PathBuf;

/// A directory that write-side operations may target.
///
/// A `WorkDir` is validated to:
/// - Exist on the filesystem
/// - Be a directory (not a file)
/// - Be writable by the current process
/// - Be represented as an absolute canonical path
///
/// Every operation that creates, moves, or renames a file revalidates its
/// target directory through this type; holding a `WorkDir` is the proof
/// that the checks ran.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::WorkDir;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = WorkDir::new(PathBuf::from("/srv/files/data/photos"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDir(PathBuf);

impl WorkDir {
    /// Creates a new `WorkDir` after validating the path.
    ///
    /// The writability probe uses the `access(2)` syscall on Unix, so it
    /// reflects effective permissions rather than mode bits alone. On
    /// other platforms the probe is skipped and the eventual write
    /// reports the failure instead.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Directory`] if the path does not exist, is
    /// not a directory, cannot be canonicalized, or is not writable.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_dir() {
            return Err(SandboxError::Directory { path });
        }

        let canonical = path
            .canonicalize()
            .map_err(|_| SandboxError::Directory { path })?;

        if !is_writable(&canonical) {
            return Err(SandboxError::Directory { path: canonical });
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical directory as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins an entry name to this directory.
    #[inline]
    #[must_use]
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.0.join(name)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

/// Checks effective write permission for a path.
#[cfg(unix)]
pub(crate) fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(path_cstring) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: access() is safe to call with a valid C string. The pointer
    // is valid for the duration of the call and the call does not modify
    // the string.
    #[allow(unsafe_code)]
    let result = unsafe { libc::access(path_cstring.as_ptr(), libc::W_OK) };
    result == 0
}

/// Checks effective write permission for a path.
#[cfg(not(unix))]
pub(crate) fn is_writable(path: &Path) -> bool {
    // No reliable probe off Unix; let the eventual write surface the error.
    let _ = path;
    true
}
