//! Directory content listing.

use std::fs;
use std::path::Path;

use crate::Result;
use crate::SandboxError;
use crate::types::EntryKind;

/// A single file or directory reported by [`scan_directory`].
///
/// Files always carry their size in bytes; directories never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryItem {
    /// Whether the entry is a file or a directory.
    pub kind: EntryKind,
    /// Entry name (not a path).
    pub name: String,
    /// Size in bytes for files, `None` for directories.
    pub size: Option<u64>,
}

/// Scans a directory and returns its contents.
///
/// Entries are sorted directories-first, then by name. Symlinks that
/// point at directories are reported but never descended into, so a link
/// placed inside the tree cannot turn a recursive scan into a walk of the
/// wider filesystem; symlinks to files are reported like the files they
/// resolve to. With `recursive` set, subdirectory contents are appended
/// to the same flat list.
///
/// # Errors
///
/// Returns [`SandboxError::Directory`] if `path` is not a directory, or
/// [`SandboxError::Io`] if reading it fails.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::scan_directory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// for item in scan_directory("/srv/files/data", false)? {
///     println!("{} ({:?} bytes)", item.name, item.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn scan_directory(path: impl AsRef<Path>, recursive: bool) -> Result<Vec<DirectoryItem>> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(SandboxError::Directory {
            path: path.to_path_buf(),
        });
    }

    let mut items = Vec::new();
    let mut subdirs = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let full_path = entry.path();

        // Broken symlinks have no metadata to report; skip them.
        let Ok(metadata) = fs::metadata(&full_path) else {
            continue;
        };
        let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());

        if metadata.is_dir() {
            items.push(DirectoryItem {
                kind: EntryKind::Directory,
                name,
                size: None,
            });
            if recursive && !is_symlink {
                subdirs.push(full_path);
            }
        } else if metadata.is_file() {
            items.push(DirectoryItem {
                kind: EntryKind::File,
                name,
                size: Some(metadata.len()),
            });
        }
    }

    items.sort_by(|a, b| {
        b.kind
            .is_directory()
            .cmp(&a.kind.is_directory())
            .then_with(|| a.name.cmp(&b.name))
    });

    for subdir in subdirs {
        items.extend(scan_directory(&subdir, true)?);
    }

    Ok(items)
}
