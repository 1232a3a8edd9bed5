//! Logging initialization.
//!
//! Uses the `tracing` ecosystem. Logs go to stderr; stdout is reserved for
//! review output and user-facing messages.

use shotcheck_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging from config, with CLI overrides.
///
/// `--verbose` forces DEBUG level; `--json-logs` forces JSON output. The
/// RUST_LOG environment variable overrides the level either way.
pub fn init(config: &Config, verbose_override: bool, json_logs_override: bool) {
    let default_level = if verbose_override {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_logs_override || config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
