//! Validated in-sandbox path type.

use crate::Result;
use crate::SandboxError;
use std::path::Path;
use std::path::PathBuf;

use super::SandboxRoot;

/// An absolute path proven to lie within a [`SandboxRoot`].
///
/// The leaf entry may not exist yet — only its parent directory must, and
/// that parent is canonicalized before the containment check, so `..`
/// components and symlinks anywhere in the parent chain are fully
/// resolved before the path is accepted. This is what makes the type safe
/// to use as an upload or rename target.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`ResolvedPath::resolve`]
/// - No `From<PathBuf>` implementation
/// - The canonical parent is always the root or a descendant of it
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SandboxRoot;
/// use filegate_core::ResolvedPath;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = SandboxRoot::new(PathBuf::from("/srv/files/data"))?;
///
/// // Valid path, leaf need not exist
/// let resolved = ResolvedPath::resolve(&root, "photos/trip.jpg")?;
///
/// // Escape attempts are rejected
/// assert!(ResolvedPath::resolve(&root, "../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// Resolves a caller-supplied relative path within a sandbox root.
    ///
    /// # Resolution Steps
    ///
    /// 1. Reject null bytes
    /// 2. Empty, `.`, and `./` resolve to the root itself
    /// 3. Strip leading separators, join onto the canonical root
    /// 4. Canonicalize the **parent** of the joined path (the leaf may
    ///    not exist yet)
    /// 5. Verify the canonical parent is the root or lies under it
    /// 6. Reattach the leaf to the canonical parent
    ///
    /// Comparing with [`Path::starts_with`] is component-wise, so a
    /// sibling directory sharing a name prefix (`/data` vs `/data-evil`)
    /// can never pass the check.
    ///
    /// When the final component of the request is `..` there is no leaf
    /// name to reattach; the full path is canonicalized and checked
    /// instead, so such requests can only ever point at an existing
    /// directory inside the root.
    ///
    /// # Errors
    ///
    /// - [`SandboxError::Containment`] if the canonical parent escapes
    ///   the root
    /// - [`SandboxError::ParentNotFound`] if the parent cannot be
    ///   resolved (missing intermediate directory)
    /// - [`SandboxError::InvalidName`] if the path contains a null byte
    pub fn resolve(root: &SandboxRoot, user_path: &str) -> Result<Self> {
        if user_path.contains('\0') {
            return Err(SandboxError::InvalidName {
                reason: "path contains a null byte".to_string(),
            });
        }

        if user_path.is_empty() || user_path == "." || user_path == "./" {
            return Ok(Self(root.as_path().to_path_buf()));
        }

        let trimmed = user_path.trim_start_matches(['/', '\\']);
        let combined = root.as_path().join(trimmed);

        // A trailing `..` leaves no leaf name to reattach; the request can
        // only denote an existing directory, so resolve it in full.
        let Some(leaf) = combined.file_name().map(ToOwned::to_owned) else {
            let canonical = match combined.canonicalize() {
                Ok(p) => p,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(SandboxError::ParentNotFound { path: combined });
                }
                Err(e) => return Err(SandboxError::Io(e)),
            };
            if !canonical.starts_with(root.as_path()) {
                return Err(SandboxError::Containment {
                    path: PathBuf::from(user_path),
                });
            }
            return Ok(Self(canonical));
        };

        let parent = combined.parent().ok_or_else(|| SandboxError::Containment {
            path: PathBuf::from(user_path),
        })?;

        let canonical_parent = match parent.canonicalize() {
            Ok(p) => p,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SandboxError::ParentNotFound {
                    path: parent.to_path_buf(),
                });
            }
            Err(e) => return Err(SandboxError::Io(e)),
        };

        if !canonical_parent.starts_with(root.as_path()) {
            return Err(SandboxError::Containment {
                path: PathBuf::from(user_path),
            });
        }

        Ok(Self(canonical_parent.join(leaf)))
    }

    /// Returns the resolved path as a `&Path`.
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
