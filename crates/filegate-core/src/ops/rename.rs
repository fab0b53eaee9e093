//! In-place file renaming.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::SandboxError;
use crate::types::FileName;
use crate::types::WorkDir;

/// Renames a file within a directory.
///
/// Unlike a move, a rename never disambiguates: the caller asked for one
/// specific name, so an occupied target is a [`SandboxError::Conflict`]
/// and nothing on disk is touched. Only the new name is validated —
/// `current` must already exist as a directory entry and is taken as-is.
///
/// # Errors
///
/// - [`SandboxError::Directory`] if `dir` is missing or not writable
/// - [`SandboxError::InvalidName`] if `new_name` is illegal
/// - [`SandboxError::Io`] if the source does not exist or the rename
///   fails
/// - [`SandboxError::Conflict`] if a file already exists at `new_name`
///
/// # Examples
///
/// ```no_run
/// use filegate_core::rename_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let final_path = rename_file("/srv/files/data", "draft.txt", "report.txt")?;
/// # Ok(())
/// # }
/// ```
pub fn rename_file(
    dir: impl AsRef<Path>,
    current_name: &str,
    new_name: &str,
) -> Result<PathBuf> {
    let dir = WorkDir::new(dir.as_ref())?;
    let new_name = FileName::validate(new_name)?;

    let src = dir.join(current_name);
    if !src.is_file() {
        return Err(SandboxError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {}", src.display()),
        )));
    }

    let dst = dir.join(new_name.as_str());
    if dst.exists() {
        return Err(SandboxError::Conflict { path: dst });
    }

    fs::rename(&src, &dst).map_err(|e| {
        SandboxError::Io(io::Error::new(
            e.kind(),
            format!("failed to rename '{current_name}' to '{new_name}': {e}"),
        ))
    })?;

    Ok(dst.canonicalize().unwrap_or(dst))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_rename_file_basic() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("a.txt"), "content").unwrap();

        let final_path = rename_file(temp.path(), "a.txt", "b.txt").unwrap();

        assert!(final_path.ends_with("b.txt"));
        assert!(!temp.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "content");
    }

    #[test]
    fn test_rename_file_conflict_leaves_both_untouched() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("a.txt"), "aaa").unwrap();
        fs::write(temp.path().join("b.txt"), "bbb").unwrap();

        let result = rename_file(temp.path(), "a.txt", "b.txt");
        assert!(matches!(result, Err(SandboxError::Conflict { .. })));

        assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "aaa");
        assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "bbb");
    }

    #[test]
    fn test_rename_file_missing_source() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = rename_file(temp.path(), "absent.txt", "b.txt");
        assert!(matches!(result, Err(SandboxError::Io(_))));
    }

    #[test]
    fn test_rename_file_invalid_new_name() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("a.txt"), "content").unwrap();

        let result = rename_file(temp.path(), "a.txt", "bad:name?.txt");
        assert!(matches!(result, Err(SandboxError::InvalidName { .. })));
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_rename_file_invalid_directory() {
        let result = rename_file("/nonexistent/dir", "a.txt", "b.txt");
        assert!(matches!(result, Err(SandboxError::Directory { .. })));
    }

    #[test]
    fn test_rename_file_never_disambiguates() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("a.txt"), "aaa").unwrap();
        fs::write(temp.path().join("b.txt"), "bbb").unwrap();

        let _ = rename_file(temp.path(), "a.txt", "b.txt");
        assert!(
            !temp.path().join("b_1.txt").exists(),
            "rename must not invent sequential names"
        );
    }
}
