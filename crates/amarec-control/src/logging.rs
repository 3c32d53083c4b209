//! Tracing subscriber setup.
//!
//! Always logs to stderr. When diagnostics are enabled a second, more
//! verbose layer appends to `debug.log` in the configured directory.

use crate::config::{DIAGNOSTICS_LOG_FILE, DiagnosticsConfig};

use std::fs;

use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set.
pub(crate) const DEFAULT_LOG_FILTER: &str = "amarec_control=info,amarec_control_core=info";

/// Filter for the diagnostics file.
pub(crate) const DIAGNOSTICS_LOG_FILTER: &str = "amarec_control=debug,amarec_control_core=debug";

/// Install the global subscriber.
///
/// The returned guard flushes the diagnostics file on drop and must be
/// held until the process exits.
pub(crate) fn init(diagnostics: &DiagnosticsConfig) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter());

    let log_dir = diagnostics.log_dir();
    let file_setup = if diagnostics.enabled {
        Some(fs::create_dir_all(&log_dir).map(|()| {
            let appender = tracing_appender::rolling::never(&log_dir, DIAGNOSTICS_LOG_FILE);
            tracing_appender::non_blocking(appender)
        }))
    } else {
        None
    };

    let (file_layer, guard, file_error) = match file_setup {
        Some(Ok((writer, guard))) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .with_filter(EnvFilter::new(DIAGNOSTICS_LOG_FILTER)),
            ),
            Some(guard),
            None,
        ),
        Some(Err(e)) => (None, None, Some(e)),
        None => (None, None, None),
    };

    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Some(e) = file_error {
        warn!(log_dir = ?log_dir, error = %e, "Diagnostics log unavailable");
    } else if guard.is_some() {
        debug!(log_path = ?diagnostics.log_path(), "Diagnostics log enabled");
    }

    guard
}

fn stderr_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
