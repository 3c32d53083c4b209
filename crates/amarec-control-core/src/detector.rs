use crate::{
    lock_probe::{FileLockState, LockProbe},
    source::{SourceLookup, resolve_source_path},
    title::{WindowTitles, find_recorder_title},
};

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

/// Snapshot of the recorder's inferred state.
///
/// Never cached: each call to [`RecordingDetector::detect`] re-reads window
/// titles and re-probes the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// How the source path was (or was not) derived.
    pub lookup: SourceLookup,
    /// Lock state of the source path.
    pub state: FileLockState,
}

impl Detection {
    /// `true` only when the recorder holds its output file exclusively.
    pub fn is_recording(&self) -> bool {
        self.state.is_recording()
    }
}

/// Infers whether the recorder is recording from window titles and file locks.
pub struct RecordingDetector {
    windows: Box<dyn WindowTitles>,
    probe: Box<dyn LockProbe>,
    source_dir: PathBuf,
}

impl RecordingDetector {
    /// Create a detector looking for recorder output under `source_dir`.
    pub fn new(
        windows: Box<dyn WindowTitles>,
        probe: Box<dyn LockProbe>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            windows,
            probe,
            source_dir: source_dir.into(),
        }
    }

    /// Directory the recorder writes into.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Titles of all currently visible windows.
    pub fn visible_titles(&self) -> Vec<String> {
        self.windows.visible_titles()
    }

    /// Re-read the recorder window and derive the source path.
    pub fn lookup_source(&self) -> SourceLookup {
        let title = find_recorder_title(self.windows.visible_titles());
        resolve_source_path(&self.source_dir, title.as_deref())
    }

    /// Probe a previously resolved path.
    pub fn probe_path(&self, path: Option<&Path>) -> FileLockState {
        match path {
            Some(path) => self.probe.probe(path),
            None => FileLockState::Absent,
        }
    }

    /// Full detection pass: lookup followed by a single probe.
    #[instrument(skip(self))]
    pub fn detect(&self) -> Detection {
        let lookup = self.lookup_source();
        let state = self.probe_path(lookup.path());

        info!(source = ?lookup.path(), state = ?state, "Recording state detected");

        Detection { lookup, state }
    }
}
