use crate::config::{default_hold_ms, default_keys};

use amarec_control_core::{CoreResult, HotkeyChord};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Start/stop chord sent to the recorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Key names pressed together, in order (e.g. `["ctrl", "z"]`).
    #[serde(default = "default_keys")]
    pub keys: Vec<String>,

    /// Milliseconds between pressing and releasing the chord.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            hold_ms: default_hold_ms(),
        }
    }
}

impl HotkeyConfig {
    /// Parse the configured key names.
    #[track_caller]
    pub fn chord(&self) -> CoreResult<HotkeyChord> {
        HotkeyChord::parse(&self.keys)
    }

    /// Key hold as a `Duration`.
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }
}
