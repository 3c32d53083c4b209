//! Per-invocation labels handed over by the game-event logger.
//!
//! Unset variables collapse to empty strings. Each one is reported with a
//! warning so malformed destination names show up in the logs.

use std::path::PathBuf;

use tracing::warn;

/// Destination (and source) directory of recordings.
pub const DESTINATION_DIR_VAR: &str = "IKALOG_MP4_DESTDIR";
/// Destination name suggested by the logger. Only shown in diagnostics.
pub const DESTINATION_NAME_VAR: &str = "IKALOG_MP4_DESTNAME";
/// Stage label.
pub const STAGE_VAR: &str = "IKALOG_STAGE";
/// Rule label.
pub const RULE_VAR: &str = "IKALOG_RULE";
/// Outcome label, `win`/`lose`/`unknown` by convention.
pub const WON_VAR: &str = "IKALOG_WON";

/// Every variable this tool reads, in diagnostics order.
pub const ALL_VARS: [&str; 5] = [
    DESTINATION_DIR_VAR,
    DESTINATION_NAME_VAR,
    STAGE_VAR,
    RULE_VAR,
    WON_VAR,
];

/// Labels substituted into the filename template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    /// `%stage%`
    pub stage: String,
    /// `%rule%`
    pub rule: String,
    /// `%won%`
    pub won: String,
}

/// Resolved per-invocation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Directory the recorder writes into and recordings are renamed within.
    pub destination_dir: PathBuf,
    /// Template labels.
    pub labels: Labels,
}

impl Environment {
    /// Read from the process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Read through an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| match lookup(name) {
            Some(value) => value,
            None => {
                warn!(variable = name, "Environment variable not set, using empty string");
                String::new()
            }
        };

        Self {
            destination_dir: PathBuf::from(get(DESTINATION_DIR_VAR)),
            labels: Labels {
                stage: get(STAGE_VAR),
                rule: get(RULE_VAR),
                won: get(WON_VAR),
            },
        }
    }
}
