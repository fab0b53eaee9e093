//! Collision-free sequential file naming.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Result;
use crate::types::WorkDir;

use super::lock::DirLocks;
use super::lock::LockFile;

/// Default bound on naming-lock waits.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Produces filesystem paths that are free at the time of check.
///
/// Given a target directory and a desired name, `free_path` returns the
/// name itself if it is unused, or the first unused `name_1.ext`,
/// `name_2.ext`, … otherwise. The probe loop is serialized per directory
/// through [`DirLocks`], so concurrent callers inside one process can
/// never both decide on the same candidate. For deployments where several
/// processes write into the same directories, [`with_file_locks`] extends
/// the serialization with an advisory flock on a sentinel entry.
///
/// The returned path is a promise, not a reservation: callers must create
/// or move onto it promptly and treat a late collision (a third party
/// creating the file after the lock is released) as an ordinary I/O
/// error.
///
/// One namer is meant to be shared by all workers of a process.
///
/// [`with_file_locks`]: SequentialNamer::with_file_locks
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SequentialNamer;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let namer = SequentialNamer::new();
/// let target = namer.free_path(PathBuf::from("/srv/files/data"), "report.pdf")?;
/// std::fs::write(&target, b"...")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SequentialNamer {
    locks: DirLocks,
    file_locks: bool,
    lock_timeout: Duration,
}

impl Default for SequentialNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialNamer {
    /// Creates a namer with in-process serialization only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: DirLocks::new(),
            file_locks: false,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Additionally takes an advisory file lock during the probe loop.
    ///
    /// Required only when multiple independent processes hand out names
    /// in the same directories. The sentinel entry
    /// ([`super::lock::LOCK_FILE_NAME`]) is created lazily on the first
    /// collision and left behind afterwards.
    #[must_use]
    pub fn with_file_locks(mut self) -> Self {
        self.file_locks = true;
        self
    }

    /// Overrides the bound on naming-lock waits.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Returns a path in `dir` for `desired` that does not exist at the
    /// time of check.
    ///
    /// The common no-collision case takes no lock at all; only the
    /// counter probe pays for serialization.
    ///
    /// # Errors
    ///
    /// - [`crate::SandboxError::Directory`] if `dir` is missing or not
    ///   writable
    /// - [`crate::SandboxError::LockTimeout`] if the naming lock cannot
    ///   be acquired within the configured bound
    pub fn free_path(&self, dir: impl AsRef<Path>, desired: &str) -> Result<PathBuf> {
        let dir = WorkDir::new(dir.as_ref())?;
        let (stem, ext) = split_name(desired);

        let candidate = dir.join(format!("{stem}{ext}"));
        if !candidate.exists() {
            return Ok(candidate);
        }

        let _guard = self.locks.acquire(dir.as_path(), self.lock_timeout)?;
        let _file_lock = if self.file_locks {
            Some(LockFile::acquire(dir.as_path(), self.lock_timeout)?)
        } else {
            None
        };

        let mut counter: u64 = 1;
        loop {
            let candidate = dir.join(format!("{stem}_{counter}{ext}"));
            if !candidate.exists() {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

/// Splits a desired name into stem and dot-prefixed, lower-cased extension.
///
/// The extension is lower-cased so that `Photo.JPG` and `photo.jpg`
/// collide into one sequence instead of shadowing each other on
/// case-insensitive filesystems.
fn split_name(name: &str) -> (String, String) {
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    (stem, ext)
}
