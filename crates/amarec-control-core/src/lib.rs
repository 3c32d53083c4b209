//! AmaRec Control Core Library
//!
//! Black-box control of the AmaRecTV screen recorder. The recorder offers no
//! API, so recording state is inferred from its window title and from whether
//! its output file is held exclusively open, and commands are delivered as a
//! synthetic hotkey chord.
//!
//! # Example
//!
//! ```no_run
//! use amarec_control_core::{
//!     Command, ControllerSettings, CoreResult, Environment, HotkeyChord, HotkeySignaler,
//!     KeyCode, KeyInjector, LocalClock, OsLockProbe, RecorderController, RecordingDetector,
//!     WindowTitles, DEFAULT_KEY_HOLD,
//! };
//!
//! struct NoWindows;
//! impl WindowTitles for NoWindows {
//!     fn visible_titles(&self) -> Vec<String> {
//!         Vec::new()
//!     }
//! }
//!
//! struct Printer;
//! impl KeyInjector for Printer {
//!     fn key_down(&mut self, key: KeyCode) -> CoreResult<()> {
//!         println!("down {}", key);
//!         Ok(())
//!     }
//!     fn key_up(&mut self, key: KeyCode) -> CoreResult<()> {
//!         println!("up {}", key);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> CoreResult<()> {
//!     let env = Environment::from_process();
//!     let detector = RecordingDetector::new(
//!         Box::new(NoWindows),
//!         Box::new(OsLockProbe),
//!         env.destination_dir.clone(),
//!     );
//!     let signaler =
//!         HotkeySignaler::new(Box::new(Printer), HotkeyChord::default(), DEFAULT_KEY_HOLD);
//!     let settings = ControllerSettings {
//!         labels: env.labels,
//!         ..ControllerSettings::default()
//!     };
//!
//!     let mut controller =
//!         RecorderController::new(detector, signaler, Box::new(LocalClock), settings);
//!     controller.run(Command::Start)?;
//!     Ok(())
//! }
//! ```

mod controller;
mod detector;
mod environment;
mod error;
mod filename;
mod hotkey;
mod lock_probe;
mod source;
mod title;

pub use {
    controller::{
        Command, ControllerSettings, DEFAULT_RELEASE_WAIT, DEFAULT_RESULT_DISPLAY_WAIT, Outcome,
        RecorderController, ReleaseWait, StopPhase,
    },
    detector::{Detection, RecordingDetector},
    environment::{
        ALL_VARS, DESTINATION_DIR_VAR, DESTINATION_NAME_VAR, Environment, Labels, RULE_VAR,
        STAGE_VAR, WON_VAR,
    },
    error::ControlError,
    error::Result as CoreResult,
    filename::{Clock, DEFAULT_FILENAME_TEMPLATE, FilenameTemplate, LocalClock, OUTPUT_EXTENSION},
    hotkey::{DEFAULT_KEY_HOLD, HotkeyChord, HotkeySignaler, KeyCode, KeyInjector, MAX_FUNCTION_KEY},
    lock_probe::{FileLockState, LockProbe, OsLockProbe},
    source::{SourceLookup, resolve_source_path},
    title::{
        FILENAME_OFFSET, MIN_RECORDING_TITLE_LEN, RECORDER_MARKER_LEN, RECORDER_TITLE_MARKER,
        RECORDING_EXTENSION, WindowTitles, extract_filename, find_recorder_title,
        is_recorder_title,
    },
};

#[cfg(test)]
mod tests;
