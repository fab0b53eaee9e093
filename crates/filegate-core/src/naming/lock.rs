//! Directory-scoped naming locks.
//!
//! Sequential naming has a probe-then-decide window: two callers that both
//! observe `name.txt` occupied would both pick `name_1.txt`. The locks in
//! this module serialize that window per directory.
//!
//! Within one process, [`DirLocks`] keys a busy-set by canonical directory
//! path — no lock files, no leaked mutexes, bounded waits. When several
//! processes share a directory, an advisory [`LockFile`] on a sentinel
//! entry extends the same guarantee across process boundaries; only
//! participants that take the lock are constrained.

use std::collections::HashSet;
use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use crate::Result;
use crate::SandboxError;

/// Name of the sentinel entry used for cross-process locking.
///
/// The sentinel is created lazily, on the first collision in a directory,
/// and is deliberately never removed: unlinking it would race a concurrent
/// holder. Hosts that want tidy directories can sweep for this fixed name.
pub const LOCK_FILE_NAME: &str = ".naming.lock";

/// How often a blocked file-lock acquisition re-polls.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// In-process mutual exclusion keyed by directory path.
///
/// One instance is shared by all workers of a process (it lives inside
/// [`crate::SequentialNamer`]). Acquisition blocks until the directory is
/// free or the bounded wait expires; expiry surfaces as a retryable
/// [`SandboxError::LockTimeout`].
///
/// Locks on different directories never contend.
#[derive(Debug, Default)]
pub struct DirLocks {
    busy: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

impl DirLocks {
    /// Creates an empty lock set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `dir`, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::LockTimeout`] if the directory is still
    /// held when the wait expires.
    pub fn acquire(&self, dir: &Path, timeout: Duration) -> Result<DirLockGuard<'_>> {
        let start = Instant::now();
        let mut busy = self.busy.lock().unwrap_or_else(PoisonError::into_inner);

        while busy.contains(dir) {
            let waited = start.elapsed();
            if waited >= timeout {
                return Err(SandboxError::LockTimeout {
                    dir: dir.to_path_buf(),
                    waited,
                });
            }
            let (guard, _timed_out) = self
                .released
                .wait_timeout(busy, timeout - waited)
                .unwrap_or_else(PoisonError::into_inner);
            busy = guard;
        }

        busy.insert(dir.to_path_buf());
        drop(busy);

        Ok(DirLockGuard {
            owner: self,
            dir: dir.to_path_buf(),
        })
    }
}

/// RAII guard for an in-process directory lock.
///
/// Dropping the guard releases the directory and wakes blocked waiters.
#[derive(Debug)]
pub struct DirLockGuard<'a> {
    owner: &'a DirLocks,
    dir: PathBuf,
}

impl Drop for DirLockGuard<'_> {
    fn drop(&mut self) {
        let mut busy = self
            .owner
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        busy.remove(&self.dir);
        drop(busy);
        self.owner.released.notify_all();
    }
}

/// RAII guard for a cross-process advisory file lock on a directory.
///
/// The lock is held on the directory's [`LOCK_FILE_NAME`] sentinel via
/// `flock(LOCK_EX)`. Dropping the guard closes the descriptor, which
/// releases the lock; the sentinel file itself stays behind.
#[derive(Debug)]
pub(crate) struct LockFile {
    _file: File,
}

impl LockFile {
    /// Acquires the advisory lock for `dir`, polling at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::LockTimeout`] if the lock is still held
    /// elsewhere when the wait expires, or [`SandboxError::Io`] if the
    /// sentinel cannot be opened.
    pub(crate) fn acquire(dir: &Path, timeout: Duration) -> Result<Self> {
        let lock_path = dir.join(LOCK_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| {
                SandboxError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to open lock file {}: {e}", lock_path.display()),
                ))
            })?;

        let start = Instant::now();
        loop {
            if try_flock_exclusive(&file)? {
                return Ok(Self { _file: file });
            }
            let waited = start.elapsed();
            if waited >= timeout {
                return Err(SandboxError::LockTimeout {
                    dir: dir.to_path_buf(),
                    waited,
                });
            }
            std::thread::sleep(LOCK_POLL_INTERVAL.min(timeout - waited));
        }
    }
}

/// Attempts a non-blocking exclusive flock; `Ok(false)` means held elsewhere.
#[cfg(unix)]
fn try_flock_exclusive(file: &File) -> Result<bool> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    // SAFETY: flock is a standard POSIX call. fd is a valid descriptor
    // owned by `file` for the duration of the call.
    #[allow(unsafe_code)]
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        return Ok(true);
    }
    let err = std::io::Error::last_os_error();
    if err.kind() == std::io::ErrorKind::WouldBlock {
        return Ok(false);
    }
    Err(SandboxError::Io(err))
}

/// Attempts a non-blocking exclusive flock; `Ok(false)` means held elsewhere.
#[cfg(not(unix))]
fn try_flock_exclusive(file: &File) -> Result<bool> {
    let _ = file;
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_acquire_and_release() {
        let locks = DirLocks::new();
        let dir = Path::new("/data/photos");

        let guard = locks.acquire(dir, Duration::from_secs(1)).unwrap();
        drop(guard);

        // Reacquirable after release.
        let guard = locks.acquire(dir, Duration::from_secs(1)).unwrap();
        drop(guard);
    }

    #[test]
    fn test_different_directories_do_not_contend() {
        let locks = DirLocks::new();
        let _a = locks
            .acquire(Path::new("/data/a"), Duration::from_secs(1))
            .unwrap();
        let _b = locks
            .acquire(Path::new("/data/b"), Duration::from_secs(1))
            .unwrap();
    }

    #[test]
    fn test_acquire_times_out_while_held() {
        let locks = Arc::new(DirLocks::new());
        let dir = PathBuf::from("/data/held");

        let guard = locks.acquire(&dir, Duration::from_secs(1)).unwrap();

        let locks2 = Arc::clone(&locks);
        let dir2 = dir.clone();
        let handle =
            std::thread::spawn(move || locks2.acquire(&dir2, Duration::from_millis(50)).map(|_| ()));

        let result = handle.join().unwrap();
        assert!(matches!(
            result,
            Err(SandboxError::LockTimeout { waited, .. }) if waited >= Duration::from_millis(50)
        ));

        drop(guard);
    }

    #[test]
    fn test_blocked_waiter_wakes_on_release() {
        let locks = Arc::new(DirLocks::new());
        let dir = PathBuf::from("/data/handover");

        let guard = locks.acquire(&dir, Duration::from_secs(1)).unwrap();

        let locks2 = Arc::clone(&locks);
        let dir2 = dir.clone();
        let handle =
            std::thread::spawn(move || locks2.acquire(&dir2, Duration::from_secs(5)).map(|_| ()));

        std::thread::sleep(Duration::from_millis(50));
        drop(guard);

        let result = handle.join().unwrap();
        assert!(result.is_ok(), "waiter should acquire once the holder drops");
    }

    #[test]
    fn test_lock_file_creates_sentinel() {
        let temp = TempDir::new().expect("failed to create temp dir");

        let guard = LockFile::acquire(temp.path(), Duration::from_secs(1)).unwrap();
        assert!(temp.path().join(LOCK_FILE_NAME).exists());
        drop(guard);

        // Sentinel stays behind; lock is reacquirable.
        assert!(temp.path().join(LOCK_FILE_NAME).exists());
        let _guard = LockFile::acquire(temp.path(), Duration::from_secs(1)).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_lock_file_contends_across_descriptors() {
        let temp = TempDir::new().expect("failed to create temp dir");

        let _held = LockFile::acquire(temp.path(), Duration::from_secs(1)).unwrap();
        let result = LockFile::acquire(temp.path(), Duration::from_millis(60));
        assert!(matches!(result, Err(SandboxError::LockTimeout { .. })));
    }
}
