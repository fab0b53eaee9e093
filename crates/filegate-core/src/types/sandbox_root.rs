//! Validated sandbox root directory type.

use crate::Result;
use crate::SandboxError;
use std::path::Path;
use std::path::PathBuf;

/// The single directory beyond which no resolved path may escape.
///
/// A `SandboxRoot` is validated to:
/// - Exist on the filesystem
/// - Be a directory (not a file)
/// - Be represented as an absolute canonical path
///
/// It is owned by the hosting process, created once at startup, and never
/// derived from caller input. All containment checks compare against its
/// canonical form, so symlinks in the configured path are resolved before
/// any request is served.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SandboxRoot;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = SandboxRoot::new(PathBuf::from("/srv/files/data"))?;
/// println!("serving from {}", root.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot(PathBuf);

impl SandboxRoot {
    /// Creates a new `SandboxRoot` after validating the path.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::Directory`] if the path does not exist, is
    /// not a directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_dir() {
            return Err(SandboxError::Directory { path });
        }

        let canonical = path
            .canonicalize()
            .map_err(|_| SandboxError::Directory { path })?;

        Ok(Self(canonical))
    }

    /// Returns the canonical root as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}
