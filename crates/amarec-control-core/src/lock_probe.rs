//! File exclusivity probing.
//!
//! The recorder holds its output file open without write sharing for as long
//! as it records. Attempting a write open that itself allows sharing therefore
//! fails exactly while a recording is live.

use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
};

use tracing::{debug, instrument};

/// Observed lock state of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLockState {
    /// No path, or the path is not an existing regular file.
    Absent,
    /// File exists and a shared write open succeeded.
    Unlocked,
    /// File exists but the OS refused the shared write open.
    Locked,
}

impl FileLockState {
    /// A locked file means the recorder is writing to it.
    pub fn is_recording(self) -> bool {
        matches!(self, FileLockState::Locked)
    }
}

/// Non-blocking, single-shot lock probe.
pub trait LockProbe {
    /// Probe `path` once. Must not leave a handle open.
    fn probe(&self, path: &Path) -> FileLockState;
}

/// [`LockProbe`] backed by the OS file-open primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsLockProbe;

impl LockProbe for OsLockProbe {
    #[instrument(skip(self))]
    fn probe(&self, path: &Path) -> FileLockState {
        if path.as_os_str().is_empty() || !path.is_file() {
            return FileLockState::Absent;
        }

        match open_shared_for_write(path) {
            Ok(file) => {
                // Close immediately so the probe never holds a lock of its own.
                drop(file);
                FileLockState::Unlocked
            }
            Err(e) => {
                debug!(error = %e, "Shared write open refused");
                FileLockState::Locked
            }
        }
    }
}

#[cfg(target_os = "windows")]
fn open_shared_for_write(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    use windows::Win32::Storage::FileSystem::{FILE_SHARE_READ, FILE_SHARE_WRITE};

    OpenOptions::new()
        .write(true)
        .share_mode(FILE_SHARE_READ.0 | FILE_SHARE_WRITE.0)
        .open(path)
}

// Without mandatory locking any refused write open is treated as "held".
#[cfg(not(target_os = "windows"))]
fn open_shared_for_write(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).open(path)
}
