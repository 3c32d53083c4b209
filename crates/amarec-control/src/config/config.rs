//! Configuration management for amarec-control.
//!
//! Replaces the compiled-in hotkey, timing and template constants with a
//! TOML file under the platform config directory. Per-invocation labels
//! still come from the environment.

use crate::{
    AppError, AppResult,
    config::{DiagnosticsConfig, HotkeyConfig, OutputConfig, TimingConfig},
};

use amarec_control_core::{ControllerSettings, FilenameTemplate, Labels, ReleaseWait};

use std::{
    fs,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use crate::config::ReleaseConfig;
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "amarec-control";
const PROJECT_NAME: &str = "AmaRec-Control";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Recorder start/stop chord.
    #[serde(default)]
    pub hotkey: HotkeyConfig,
    /// Waits around the stop hotkey.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Destination naming.
    #[serde(default)]
    pub output: OutputConfig,
    /// Optional diagnostics log.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::from_toml(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Parse and validate configuration text.
    #[track_caller]
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make the controller misbehave.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        self.hotkey.chord().map_err(|e| AppError::ConfigError {
            reason: format!("Invalid [hotkey] keys: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let ReleaseConfig::Poll { interval_ms: 0, .. } = self.timing.release {
            return Err(AppError::ConfigError {
                reason: "[timing.release] interval_ms must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Write the configuration to its platform path.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        info!(config_path = ?config_path, "Configuration saved");
        Ok(())
    }

    /// Write to `path` through a sibling `.toml.tmp` file and a rename, so a
    /// crash never leaves a truncated config behind.
    #[track_caller]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let staging = path.with_extension("toml.tmp");
        let config_error = |action: &str, e: io::Error| AppError::ConfigError {
            reason: format!("Failed to {} {:?}: {}", action, staging, e),
            location: ErrorLocation::from(Location::caller()),
        };

        let mut file = fs::File::create(&staging).map_err(|e| config_error("create", e))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| config_error("write", e))?;
        drop(file);

        fs::rename(&staging, path).map_err(|e| config_error("move into place", e))?;

        debug!(path = ?path, "Config written");

        Ok(())
    }

    /// Controller settings for this configuration and the given labels.
    pub fn controller_settings(&self, labels: Labels) -> ControllerSettings {
        ControllerSettings {
            result_display_wait: self.timing.result_display_wait(),
            release_wait: ReleaseWait::from(&self.timing.release),
            template: FilenameTemplate::new(self.output.filename_template.clone()),
            labels,
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let dirs = ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_NAME)
            .ok_or_else(|| AppError::ConfigError {
                reason: "No home directory to place the config in".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }
}
