//! Logging setup: human-readable stderr output plus an optional JSON log file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::AppError;

const APP_NAME: &str = "prospection-guard";

/// Filter from `RUST_LOG`, else `info` (or `debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "info,prospection_guard=debug"
    } else {
        "info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// Stdout is left alone so `--json` output stays machine-readable. When
/// `log_file` is given, bunyan JSON records are appended to it as well.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), AppError> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(BunyanFormattingLayer::new(APP_NAME.to_string(), Mutex::new(file)))
        }
        None => None,
    };

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    Registry::default()
        .with(env_filter(verbose))
        .with(console_layer)
        .with(file_layer.is_some().then_some(JsonStorageLayer))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!("Logging initialized (file: {:?})", log_file);
    Ok(())
}
