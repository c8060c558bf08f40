//! Structured logging with environment variable configuration.
//!
//! Logs go to stderr so the report on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::GlazeConfig;

fn filter_from_config(config: &GlazeConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `GLAZE_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already set, this function silently keeps it.
pub fn init_logging(config: &GlazeConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    // The first subscriber wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
