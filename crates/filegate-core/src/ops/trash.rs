//! Soft deletion into a trash directory.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::naming::SequentialNamer;

use super::move_file::move_file;

/// Moves a file into the trash directory instead of deleting it.
///
/// This is [`move_file`] pointed at the trash root: the entry keeps its
/// name when free and picks up a `_1`, `_2`, … suffix when an earlier
/// trashed file already claimed it, and the relocation survives the trash
/// directory living on a different storage device than the data root.
///
/// # Errors
///
/// Propagates the errors of [`move_file`].
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SequentialNamer;
/// use filegate_core::move_to_trash;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let namer = SequentialNamer::new();
/// let trashed = move_to_trash("/srv/files/data/old.txt", "/srv/files/trash", &namer)?;
/// println!("recoverable at {}", trashed.display());
/// # Ok(())
/// # }
/// ```
pub fn move_to_trash(
    file: impl AsRef<Path>,
    trash_dir: impl AsRef<Path>,
    namer: &SequentialNamer,
) -> Result<PathBuf> {
    move_file(file, trash_dir, namer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_to_trash_basic() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let trash = temp.path().join("trash");
        fs::create_dir(&trash).unwrap();

        let file = temp.path().join("doomed.txt");
        fs::write(&file, "content").unwrap();

        let namer = SequentialNamer::new();
        let trashed = move_to_trash(&file, &trash, &namer).unwrap();

        assert!(!file.exists());
        assert!(trashed.starts_with(trash.canonicalize().unwrap()));
        assert_eq!(fs::read_to_string(&trashed).unwrap(), "content");
    }

    #[test]
    fn test_move_to_trash_disambiguates() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let trash = temp.path().join("trash");
        fs::create_dir(&trash).unwrap();
        fs::write(trash.join("doomed.txt"), "first victim").unwrap();

        let file = temp.path().join("doomed.txt");
        fs::write(&file, "second victim").unwrap();

        let namer = SequentialNamer::new();
        let trashed = move_to_trash(&file, &trash, &namer).unwrap();

        assert!(trashed.ends_with("doomed_1.txt"));
        assert_eq!(
            fs::read_to_string(trash.join("doomed.txt")).unwrap(),
            "first victim"
        );
    }

    #[test]
    fn test_move_to_trash_missing_trash_dir() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file = temp.path().join("doomed.txt");
        fs::write(&file, "content").unwrap();

        let namer = SequentialNamer::new();
        let result = move_to_trash(&file, temp.path().join("no-trash"), &namer);
        assert!(result.is_err());
        assert!(file.exists(), "file must survive a failed trash move");
    }
}
