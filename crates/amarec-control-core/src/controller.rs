//! Start/stop sequencing against the recorder.
//!
//! Every invocation is a fresh process, so nothing is remembered between
//! `start` and `stop`. Recording state is reconstructed from the recorder's
//! window title and the lock on its output file each time.

use crate::{
    ControlError, CoreResult,
    detector::RecordingDetector,
    environment::Labels,
    filename::{Clock, FilenameTemplate},
    hotkey::HotkeySignaler,
};

use std::{
    ffi::OsString,
    fmt, fs,
    panic::Location,
    path::{Path, PathBuf},
    str::FromStr,
    thread,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

/// Wait between the result screen appearing and the stop hotkey.
pub const DEFAULT_RESULT_DISPLAY_WAIT: Duration = Duration::from_secs(20);

/// Wait between the stop hotkey and the rename.
pub const DEFAULT_RELEASE_WAIT: Duration = Duration::from_secs(10);

/// The two operations the controller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin recording if the recorder is idle.
    Start,
    /// Stop the active recording and rename its file.
    Stop,
}

impl Command {
    /// Parse a full argument list (program name already skipped).
    ///
    /// Exactly one argument, `start` or `stop`, is accepted. Arguments that
    /// are not valid Unicode are rejected like any other unknown word.
    #[track_caller]
    pub fn from_args<I, S>(args: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        match (args.next(), args.next()) {
            (Some(arg), None) => match arg.into_string() {
                Ok(arg) => arg.parse(),
                Err(raw) => Err(ControlError::UnknownCommand {
                    given: Some(raw.to_string_lossy().into_owned()),
                    location: ErrorLocation::from(Location::caller()),
                }),
            },
            (first, _) => Err(ControlError::UnknownCommand {
                given: first.map(|arg| arg.to_string_lossy().into_owned()),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl FromStr for Command {
    type Err = ControlError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            other => Err(ControlError::UnknownCommand {
                given: Some(other.to_string()),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
        }
    }
}

/// How to wait for the recorder to release its output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseWait {
    /// Unconditional sleep.
    Fixed(Duration),
    /// Probe the file every `interval` until unlocked or `timeout` elapses.
    Poll {
        /// Delay between probes.
        interval: Duration,
        /// Upper bound on the total wait.
        timeout: Duration,
    },
}

impl Default for ReleaseWait {
    fn default() -> Self {
        ReleaseWait::Fixed(DEFAULT_RELEASE_WAIT)
    }
}

/// Phases of the stop sequence, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPhase {
    /// Letting the recorder's result screen play out.
    WaitingForResultDisplay,
    /// Sending the stop chord.
    Signaling,
    /// Waiting for the output file lock to drop.
    WaitingForFileRelease,
    /// Moving the file to its templated name.
    Renaming,
}

impl fmt::Display for StopPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopPhase::WaitingForResultDisplay => "waiting_for_result_display",
            StopPhase::Signaling => "signaling",
            StopPhase::WaitingForFileRelease => "waiting_for_file_release",
            StopPhase::Renaming => "renaming",
        };
        f.write_str(name)
    }
}

/// Timing and naming knobs for [`RecorderController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Sleep before sending the stop chord.
    pub result_display_wait: Duration,
    /// Wait policy between the stop chord and the rename.
    pub release_wait: ReleaseWait,
    /// Destination filename template.
    pub template: FilenameTemplate,
    /// Template labels.
    pub labels: Labels,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            result_display_wait: DEFAULT_RESULT_DISPLAY_WAIT,
            release_wait: ReleaseWait::default(),
            template: FilenameTemplate::default(),
            labels: Labels::default(),
        }
    }
}

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Start chord sent.
    Started,
    /// Recording stopped and renamed.
    Stopped {
        /// Recorder output path.
        from: PathBuf,
        /// Final destination path.
        to: PathBuf,
    },
}

/// Drives the recorder through hotkeys and renames its output.
pub struct RecorderController {
    detector: RecordingDetector,
    signaler: HotkeySignaler,
    clock: Box<dyn Clock>,
    settings: ControllerSettings,
}

impl RecorderController {
    /// Assemble a controller from its collaborators.
    pub fn new(
        detector: RecordingDetector,
        signaler: HotkeySignaler,
        clock: Box<dyn Clock>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            detector,
            signaler,
            clock,
            settings,
        }
    }

    /// Run one command to completion.
    #[track_caller]
    pub fn run(&mut self, command: Command) -> CoreResult<Outcome> {
        match command {
            Command::Start => self.start().map(|()| Outcome::Started),
            Command::Stop => self
                .stop()
                .map(|(from, to)| Outcome::Stopped { from, to }),
        }
    }

    /// Send the start chord unless a recording is already live.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<()> {
        let detection = self.detector.detect();

        if detection.is_recording() {
            let path = detection.lookup.path().map(Path::to_path_buf).unwrap_or_default();
            warn!(path = ?path, "Start requested while already recording");
            return Err(ControlError::AlreadyRecording {
                path,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.signaler.signal()?;

        info!(chord = %self.signaler.chord(), "Start hotkey sent");

        Ok(())
    }

    /// Stop the live recording and rename its file.
    ///
    /// Returns `(source, destination)`. The source path is resolved once,
    /// before the stop chord, since the recorder's title may no longer name
    /// the file afterwards.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<(PathBuf, PathBuf)> {
        let detection = self.detector.detect();

        let source = match detection.lookup.path() {
            Some(path) if detection.is_recording() => path.to_path_buf(),
            _ => {
                warn!(lookup = ?detection.lookup, "Stop requested while not recording");
                return Err(ControlError::NotRecording {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        self.enter(StopPhase::WaitingForResultDisplay);
        thread::sleep(self.settings.result_display_wait);

        self.enter(StopPhase::Signaling);
        self.signaler.signal()?;

        self.enter(StopPhase::WaitingForFileRelease);
        self.wait_for_release(&source);

        self.enter(StopPhase::Renaming);
        let destination = self.settings.template.destination_path(
            self.detector.source_dir(),
            &self.clock.now(),
            &self.settings.labels,
        );

        fs::rename(&source, &destination).map_err(|e| ControlError::RenameFailed {
            from: source.clone(),
            to: destination.clone(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(from = ?source, to = ?destination, "Recording renamed");

        Ok((source, destination))
    }

    fn enter(&self, phase: StopPhase) {
        info!(phase = %phase, "Stop sequence");
    }

    fn wait_for_release(&self, source: &Path) {
        match self.settings.release_wait {
            ReleaseWait::Fixed(wait) => thread::sleep(wait),
            ReleaseWait::Poll { interval, timeout } => {
                let started = Instant::now();
                loop {
                    if !self.detector.probe_path(Some(source)).is_recording() {
                        info!(
                            waited_ms = started.elapsed().as_millis(),
                            "Recorder released output file"
                        );
                        return;
                    }

                    let elapsed = started.elapsed();
                    if elapsed >= timeout {
                        warn!(
                            waited_ms = elapsed.as_millis(),
                            "Output file still locked after timeout, renaming anyway"
                        );
                        return;
                    }

                    thread::sleep(interval.min(timeout - elapsed));
                }
            }
        }
    }
}
