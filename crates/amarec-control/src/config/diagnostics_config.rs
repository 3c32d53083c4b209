use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the diagnostics log inside `log_dir`.
pub(crate) const DIAGNOSTICS_LOG_FILE: &str = "debug.log";

/// Optional diagnostics log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Write `debug.log` and a state snapshot on every invocation.
    #[serde(default)]
    pub enabled: bool,

    /// Directory for `debug.log`. Defaults to the working directory.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl DiagnosticsConfig {
    /// Directory the log file is written into.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir().join(DIAGNOSTICS_LOG_FILE)
    }
}
