//! Sandbox containment resolution.

use crate::Result;
use crate::types::ResolvedPath;
use crate::types::SandboxRoot;

/// Resolves a caller-supplied relative path within a sandbox root.
///
/// This function delegates to [`ResolvedPath::resolve`], which:
/// - Rejects null bytes
/// - Maps empty, `.`, and `./` to the root itself
/// - Strips leading separators before joining
/// - Canonicalizes the parent directory only, so the leaf may not exist
///   yet while symlink- and `..`-based escapes are still closed
/// - Verifies the canonical parent is the root or lies under it
///
/// # Errors
///
/// - [`crate::SandboxError::Containment`] on an escape attempt
/// - [`crate::SandboxError::ParentNotFound`] if the parent of the
///   requested path does not exist
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SandboxRoot;
/// use filegate_core::resolve_safe_path;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = SandboxRoot::new(PathBuf::from("/srv/files/data"))?;
///
/// let target = resolve_safe_path(&root, "photos/trip.jpg")?;
///
/// // Traversal is rejected
/// assert!(resolve_safe_path(&root, "../etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve_safe_path(root: &SandboxRoot, user_path: &str) -> Result<ResolvedPath> {
    ResolvedPath::resolve(root, user_path)
}
