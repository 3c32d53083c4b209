//! State snapshot written to the diagnostics log before a command runs.

use amarec_control_core::{
    ALL_VARS, Clock, ControllerSettings, Environment, FileLockState, RecordingDetector,
};

use std::path::PathBuf;

use tracing::{debug, info};

/// Everything needed to reconstruct why a command did what it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) command_line: Vec<String>,
    pub(crate) variables: Vec<(&'static str, Option<String>)>,
    pub(crate) window_titles: Vec<String>,
    pub(crate) recorder_title: Option<String>,
    pub(crate) source_path: Option<PathBuf>,
    pub(crate) destination_path: PathBuf,
    pub(crate) state: FileLockState,
}

impl Snapshot {
    /// Gather a snapshot using `lookup` for environment variables.
    pub(crate) fn capture<F>(
        command_line: Vec<String>,
        lookup: F,
        detector: &RecordingDetector,
        env: &Environment,
        settings: &ControllerSettings,
        clock: &dyn Clock,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let detection = detector.detect();

        Self {
            command_line,
            variables: ALL_VARS.iter().map(|name| (*name, lookup(name))).collect(),
            window_titles: detector.visible_titles(),
            recorder_title: detection.lookup.title().map(str::to_string),
            source_path: detection.lookup.path().map(PathBuf::from),
            destination_path: settings.template.destination_path(
                &env.destination_dir,
                &clock.now(),
                &settings.labels,
            ),
            state: detection.state,
        }
    }

    /// Emit the snapshot as tracing events.
    pub(crate) fn log(&self) {
        info!(command_line = ?self.command_line, "Diagnostics snapshot");

        for (name, value) in &self.variables {
            info!(variable = name, value = value.as_deref().unwrap_or(""), "Environment");
        }

        for title in &self.window_titles {
            debug!(title = %title, "Visible window");
        }

        info!(
            recorder_title = self.recorder_title.as_deref().unwrap_or(""),
            source_path = ?self.source_path,
            destination_path = ?self.destination_path,
            state = ?self.state,
            is_recording = self.state.is_recording(),
            "Recorder state"
        );
    }
}
