//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the log level from `RUST_LOG`, then config
//!
//! # Design Decisions
//! - JSON format outside the local environment, compact format locally
//! - `debug = true` forces debug level for this crate

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::runenv::Environment;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    let level = if config.debug { "debug" } else { config.log_level.as_str() };
    format!("vaas_hook={level},warn")
}

/// Whether logs should be emitted as JSON.
pub fn use_json(config: &ObservabilityConfig, environment: Environment) -> bool {
    config.json_logs.unwrap_or(environment != Environment::Local)
}

/// Install the global subscriber. Errors if one is already installed.
pub fn init_logging(
    config: &ObservabilityConfig,
    environment: Environment,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);
    if use_json(config, environment) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    }
}
