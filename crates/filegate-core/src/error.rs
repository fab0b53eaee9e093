//! Error types for sandboxed file operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `SandboxError`.
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Errors that can occur while resolving paths or mutating files inside a
/// sandbox root.
#[derive(Error, Debug)]
pub enum SandboxError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resolved path escapes the sandbox root.
    #[error("path escapes sandbox root: {path}")]
    Containment {
        /// The caller-supplied path that attempted the escape.
        path: PathBuf,
    },

    /// Parent directory of the requested path does not exist.
    #[error("parent directory does not exist: {path}")]
    ParentNotFound {
        /// The parent directory that could not be resolved.
        path: PathBuf,
    },

    /// File name failed a legality rule.
    #[error("invalid name: {reason}")]
    InvalidName {
        /// Which rule was violated.
        reason: String,
    },

    /// Target directory is missing, not a directory, or not writable.
    #[error("invalid or unwritable directory: {path}")]
    Directory {
        /// The offending directory path.
        path: PathBuf,
    },

    /// Rename target already exists.
    #[error("target file already exists: {path}")]
    Conflict {
        /// The occupied target path.
        path: PathBuf,
    },

    /// Upload violated a size, count, or content-type policy.
    #[error("upload rejected: {reason}")]
    UploadRejected {
        /// Which policy was violated.
        reason: String,
    },

    /// Bounded wait for a directory naming lock expired.
    #[error("timed out waiting for naming lock on {dir} after {waited:?}")]
    LockTimeout {
        /// Directory whose lock could not be acquired.
        dir: PathBuf,
        /// How long the caller waited.
        waited: Duration,
    },
}

impl SandboxError {
    /// Returns `true` if this error was caused by caller input.
    ///
    /// Client errors (escape attempts, illegal names, occupied rename
    /// targets, policy violations) map to a client-error signal at the
    /// serving boundary; everything else indicates a host-side problem.
    ///
    /// # Examples
    ///
    /// ```
    /// use filegate_core::SandboxError;
    /// use std::path::PathBuf;
    ///
    /// let err = SandboxError::Containment {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_client_error());
    ///
    /// let err = SandboxError::Directory {
    ///     path: PathBuf::from("/data/missing"),
    /// };
    /// assert!(!err.is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Containment { .. }
                | Self::ParentNotFound { .. }
                | Self::InvalidName { .. }
                | Self::Conflict { .. }
                | Self::UploadRejected { .. }
        )
    }

    /// Returns `true` if the operation may be retried as-is.
    ///
    /// Only lock-wait expiry qualifies; all other errors require a change
    /// of input or of host state before a retry can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout { .. })
    }

    /// Returns the human-readable reason carried by this error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use filegate_core::SandboxError;
    ///
    /// let err = SandboxError::InvalidName {
    ///     reason: "the file name cannot be empty".to_string(),
    /// };
    /// assert_eq!(err.reason(), Some("the file name cannot be empty"));
    /// ```
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidName { reason } | Self::UploadRejected { reason } => Some(reason),
            _ => None,
        }
    }
}
