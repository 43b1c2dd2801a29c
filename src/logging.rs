//! Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level when it is set.

use std::fs::OpenOptions;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {error}")]
    File { path: String, error: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Filter directive for the configured level
fn directive(level: &str) -> String {
    let level = match level.trim().to_lowercase().as_str() {
        l @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => l.to_string(),
        _ => "info".to_string(),
    };
    format!("payclone={}", level)
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(directive(&config.level)))
}

/// Install the subscriber: stderr in `pretty` or `json` format, plus an
/// optional append-only log file.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let json = config.format.eq_ignore_ascii_case("json");

    let file = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::File {
                    path: path.clone(),
                    error: e.to_string(),
                })?;
            Some(file)
        }
        None => None,
    };

    let pretty_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let file_layer = file.map(|f| fmt::layer().with_ansi(false).with_writer(Mutex::new(f)));

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(pretty_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
