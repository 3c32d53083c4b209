use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder control errors with source location tracking.
#[derive(Error, Debug)]
pub enum ControlError {
    /// `start` requested while the recorder already holds its output file.
    #[error("Recording already active: {path:?} {location}")]
    AlreadyRecording {
        /// File the recorder is currently writing.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// `stop` requested but no locked recorder output was found.
    #[error("No active recording detected {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Invocation did not name exactly one known command.
    #[error("Unknown command: {given:?} {location}")]
    UnknownCommand {
        /// What was passed on the command line, if anything.
        given: Option<String>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Hotkey chord definition could not be parsed.
    #[error("Invalid hotkey: {reason} {location}")]
    InvalidHotkey {
        /// Description of the parse failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Synthetic key event could not be delivered to the OS.
    #[error("Hotkey injection failed: {reason} {location}")]
    HotkeyFailed {
        /// Description of the injection failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Final rename of the recorded file failed.
    #[error("Failed to rename {from:?} to {to:?}: {source} {location}")]
    RenameFailed {
        /// Recorder output path.
        from: PathBuf,
        /// Templated destination path.
        to: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`ControlError`].
pub type Result<T> = std::result::Result<T, ControlError>;
