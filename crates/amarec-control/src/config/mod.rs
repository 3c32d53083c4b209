#[allow(clippy::module_inception)]
mod config;
mod diagnostics_config;
mod hotkey_config;
mod output_config;
mod timing_config;

pub(crate) use {
    config::Config,
    diagnostics_config::{DIAGNOSTICS_LOG_FILE, DiagnosticsConfig},
    hotkey_config::HotkeyConfig,
    output_config::OutputConfig,
    timing_config::{ReleaseConfig, TimingConfig},
};

use amarec_control_core::{
    DEFAULT_FILENAME_TEMPLATE, DEFAULT_KEY_HOLD, DEFAULT_RELEASE_WAIT, DEFAULT_RESULT_DISPLAY_WAIT,
};

pub(crate) const DEFAULT_KEYS: [&str; 2] = ["ctrl", "z"];
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

pub(crate) fn default_keys() -> Vec<String> {
    DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
}

pub(crate) fn default_hold_ms() -> u64 {
    DEFAULT_KEY_HOLD.as_millis() as u64
}

pub(crate) fn default_result_display_ms() -> u64 {
    DEFAULT_RESULT_DISPLAY_WAIT.as_millis() as u64
}

pub(crate) fn default_release_wait_ms() -> u64 {
    DEFAULT_RELEASE_WAIT.as_millis() as u64
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_filename_template() -> String {
    DEFAULT_FILENAME_TEMPLATE.to_string()
}
