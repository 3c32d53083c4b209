use crate::config::{
    default_poll_interval_ms, default_release_wait_ms, default_result_display_ms,
};

use amarec_control_core::ReleaseWait;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Waits around the stop hotkey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Milliseconds to let the result screen play before stopping.
    #[serde(default = "default_result_display_ms")]
    pub result_display_ms: u64,

    /// How to wait for the recorder to release its file.
    #[serde(default)]
    pub release: ReleaseConfig,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            result_display_ms: default_result_display_ms(),
            release: ReleaseConfig::default(),
        }
    }
}

impl TimingConfig {
    /// Result-display wait as a `Duration`.
    pub fn result_display_wait(&self) -> Duration {
        Duration::from_millis(self.result_display_ms)
    }
}

/// Release-wait policy as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReleaseConfig {
    /// Sleep unconditionally.
    Fixed {
        /// Milliseconds to sleep.
        #[serde(default = "default_release_wait_ms")]
        wait_ms: u64,
    },
    /// Probe the file lock until released or timed out.
    Poll {
        /// Milliseconds between probes.
        #[serde(default = "default_poll_interval_ms")]
        interval_ms: u64,
        /// Upper bound in milliseconds.
        #[serde(default = "default_release_wait_ms")]
        timeout_ms: u64,
    },
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig::Fixed {
            wait_ms: default_release_wait_ms(),
        }
    }
}

impl From<&ReleaseConfig> for ReleaseWait {
    fn from(config: &ReleaseConfig) -> Self {
        match *config {
            ReleaseConfig::Fixed { wait_ms } => ReleaseWait::Fixed(Duration::from_millis(wait_ms)),
            ReleaseConfig::Poll {
                interval_ms,
                timeout_ms,
            } => ReleaseWait::Poll {
                interval: Duration::from_millis(interval_ms),
                timeout: Duration::from_millis(timeout_ms),
            },
        }
    }
}
