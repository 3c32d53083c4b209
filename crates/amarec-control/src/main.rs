//! AmaRec Control: start/stop the AmaRecTV recorder from game-event hooks.
//!
//! Usage: `amarec-control start|stop`. Exit status is `0` on success and `1`
//! on any failure, including a bad invocation.
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

mod config;
mod diagnostics;
mod error;
mod key_injector;
mod logging;
#[cfg(test)]
mod tests;
mod window_titles;

pub(crate) use {
    error::{AppError, Result as AppResult},
    key_injector::EnigoInjector,
    window_titles::DesktopWindows,
};

use crate::{config::Config, diagnostics::Snapshot};

use std::{env, process::ExitCode};

use amarec_control_core::{
    Command, Environment, HotkeySignaler, LocalClock, OsLockProbe, Outcome, RecorderController,
    RecordingDetector,
};
use tracing::{error, info, info_span};
use uuid::Uuid;

/// Application entry point.
fn main() -> ExitCode {
    let command = Command::from_args(env::args_os().skip(1));

    // A rejected invocation must not touch the config directory.
    let config = match command {
        Ok(_) => Config::load(),
        Err(_) => Ok(Config::default()),
    };

    let diagnostics = config
        .as_ref()
        .map(|c| c.diagnostics.clone())
        .unwrap_or_default();
    let _log_guard = logging::init(&diagnostics);

    let invocation_id = Uuid::new_v4();
    let span = info_span!(
        "invocation",
        invocation_id = %invocation_id,
        command = ?command.as_ref().ok()
    );
    let _enter = span.enter();

    let command = match command {
        Ok(command) => command,
        Err(e) => {
            error!(error = %e, "Rejected invocation");
            return ExitCode::FAILURE;
        }
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(command, &config) {
        Ok(outcome) => {
            info!(outcome = ?outcome, "Command completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> AppResult<Outcome> {
    let env = Environment::from_process();
    let chord = config.hotkey.chord()?;
    let settings = config.controller_settings(env.labels.clone());

    let detector = RecordingDetector::new(
        Box::new(DesktopWindows),
        Box::new(OsLockProbe),
        env.destination_dir.clone(),
    );

    if config.diagnostics.enabled {
        Snapshot::capture(
            env::args_os()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
            |name| env::var_os(name).map(|v| v.to_string_lossy().into_owned()),
            &detector,
            &env,
            &settings,
            &LocalClock,
        )
        .log();
    }

    let signaler = HotkeySignaler::new(
        Box::new(EnigoInjector::new()?),
        chord,
        config.hotkey.hold(),
    );

    let mut controller =
        RecorderController::new(detector, signaler, Box::new(LocalClock), settings);

    info!(command = %command, "Running command");

    Ok(controller.run(command)?)
}
