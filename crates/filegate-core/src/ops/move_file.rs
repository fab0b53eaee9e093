//! Cross-device-safe file relocation.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::SandboxError;
use crate::naming::SequentialNamer;
use crate::types::FileName;
use crate::types::WorkDir;

/// Moves a file into a destination directory, disambiguating the name on
/// collision.
///
/// The operation proceeds `validated → source-confirmed →
/// destination-decided → committed`: the source must be an existing
/// regular file with a legal name, the destination a writable directory.
/// The final name is the source's base name, or `name_1.ext`,
/// `name_2.ext`, … when occupied (decided by `namer`). The move itself is
/// an atomic rename where possible; when source and destination live on
/// different storage devices it degrades to copy-then-delete-source, with
/// the copy removed again if the source cannot be deleted — either the
/// whole operation succeeds or the filesystem is left as it was.
///
/// # Errors
///
/// - [`SandboxError::Io`] if the source is not a regular file or the
///   rename/copy fails
/// - [`SandboxError::Directory`] if the destination is missing or not
///   writable
/// - [`SandboxError::InvalidName`] if the source base name is illegal
/// - [`SandboxError::LockTimeout`] if the naming lock cannot be acquired
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SequentialNamer;
/// use filegate_core::move_file;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let namer = SequentialNamer::new();
/// let final_path = move_file("/srv/files/incoming/report.pdf", "/srv/files/data", &namer)?;
/// println!("stored as {}", final_path.display());
/// # Ok(())
/// # }
/// ```
pub fn move_file(
    src: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    namer: &SequentialNamer,
) -> Result<PathBuf> {
    let src = src.as_ref();
    let real_src = src.canonicalize().map_err(|e| {
        SandboxError::Io(io::Error::new(
            e.kind(),
            format!("source is not a valid file: {}", src.display()),
        ))
    })?;
    if !real_src.is_file() {
        return Err(SandboxError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("source is not a regular file: {}", real_src.display()),
        )));
    }

    let dest = WorkDir::new(dest_dir.as_ref())?;

    let base_name = real_src
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| SandboxError::InvalidName {
            reason: "the source file name is not valid Unicode".to_string(),
        })?;
    let name = FileName::validate(base_name)?;

    let target = namer.free_path(dest.as_path(), name.as_str())?;
    relocate(&real_src, &target)?;

    Ok(target.canonicalize().unwrap_or(target))
}

/// Moves `src` onto `target`, falling back to copy-then-delete when the
/// two paths live on different storage devices.
///
/// On a failed post-copy source delete the copy is removed again so no
/// duplicate survives; a failure of that cleanup is logged and does not
/// mask the original error.
pub(crate) fn relocate(src: &Path, target: &Path) -> Result<()> {
    match fs::rename(src, target) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_then_remove(src, target),
        Err(e) => Err(SandboxError::Io(io::Error::new(
            e.kind(),
            format!(
                "failed to rename {} to {}: {e}",
                src.display(),
                target.display()
            ),
        ))),
    }
}

/// The cross-device fallback body: copy to `target`, then delete `src`.
pub(crate) fn copy_then_remove(src: &Path, target: &Path) -> Result<()> {
    fs::copy(src, target).map_err(|e| {
        SandboxError::Io(io::Error::new(
            e.kind(),
            format!("failed to copy file across devices: {e}"),
        ))
    })?;

    if let Err(e) = fs::remove_file(src) {
        if let Err(cleanup) = fs::remove_file(target) {
            log::warn!(
                "failed to remove partial copy {}: {cleanup}",
                target.display()
            );
        }
        return Err(SandboxError::Io(io::Error::new(
            e.kind(),
            format!("failed to remove original after copy: {e}"),
        )));
    }

    Ok(())
}

/// Returns `true` if a rename failed because source and destination are
/// on different storage devices.
fn is_cross_device(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::CrossesDevices {
        return true;
    }
    #[cfg(unix)]
    {
        if e.raw_os_error() == Some(libc::EXDEV) {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_file_same_device() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();

        let src = temp.path().join("file.txt");
        fs::write(&src, "payload").unwrap();

        let namer = SequentialNamer::new();
        let final_path = move_file(&src, &dest, &namer).unwrap();

        assert!(!src.exists(), "source must be gone after the move");
        assert!(final_path.starts_with(dest.canonicalize().unwrap()));
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "payload");
    }

    #[test]
    fn test_move_file_disambiguates_on_collision() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("file.txt"), "already here").unwrap();

        let src = temp.path().join("file.txt");
        fs::write(&src, "newcomer").unwrap();

        let namer = SequentialNamer::new();
        let final_path = move_file(&src, &dest, &namer).unwrap();

        assert!(final_path.ends_with("file_1.txt"));
        assert_eq!(fs::read_to_string(dest.join("file.txt")).unwrap(), "already here");
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "newcomer");
    }

    #[test]
    fn test_move_file_missing_source() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let namer = SequentialNamer::new();

        let result = move_file(temp.path().join("absent.txt"), temp.path(), &namer);
        assert!(matches!(result, Err(SandboxError::Io(_))));
    }

    #[test]
    fn test_move_file_source_is_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let subdir = temp.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let namer = SequentialNamer::new();
        let result = move_file(&subdir, temp.path(), &namer);
        assert!(matches!(result, Err(SandboxError::Io(_))));
    }

    #[test]
    fn test_move_file_invalid_destination() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let src = temp.path().join("file.txt");
        fs::write(&src, "payload").unwrap();

        let namer = SequentialNamer::new();
        let result = move_file(&src, temp.path().join("missing"), &namer);
        assert!(matches!(result, Err(SandboxError::Directory { .. })));
    }

    #[test]
    fn test_copy_then_remove_behaves_like_move() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let src = temp.path().join("src.bin");
        let target = temp.path().join("target.bin");
        fs::write(&src, b"cross-device payload").unwrap();

        copy_then_remove(&src, &target).unwrap();

        assert!(!src.exists(), "source must be gone after the fallback");
        assert_eq!(fs::read(&target).unwrap(), b"cross-device payload");
    }

    #[test]
    fn test_copy_then_remove_missing_source() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = copy_then_remove(
            &temp.path().join("absent.bin"),
            &temp.path().join("target.bin"),
        );
        assert!(matches!(result, Err(SandboxError::Io(_))));
        assert!(!temp.path().join("target.bin").exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_is_cross_device_recognizes_exdev() {
        let err = io::Error::from_raw_os_error(libc::EXDEV);
        assert!(is_cross_device(&err));

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(!is_cross_device(&err));
    }
}
