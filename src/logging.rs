//! Structured logging via `tracing`, written to stderr so checksum lines own
//! stdout. Level defaults to off; `--verbose` raises it to info and `--debug`
//! to debug, and `RUST_LOG` overrides everything.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration derived from CLI flags.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        let level = if debug {
            "debug"
        } else if verbose {
            "info"
        } else {
            "off"
        };
        Self {
            level: level.to_string(),
        }
    }
}

/// Initialize the global subscriber. Safe to call once per process; a second
/// call reports the underlying set-global error.
pub fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
