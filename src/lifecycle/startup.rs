//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and metrics from validated configuration
//! - Build the VaaS hook
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Logging first, so later failures are reported

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

use crate::config::HookConfig;
use crate::hook::{HookError, VaasHook};
use crate::observability::{logging, metrics};
use crate::runenv::{RuntimeError, RuntimeFacts, SystemRuntime};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("failed to build VaaS hook: {0}")]
    Hook(#[from] HookError),
}

/// Initialize observability and build the hook.
pub fn start(config: &HookConfig) -> Result<VaasHook, StartupError> {
    let runtime = SystemRuntime::from_config(&config.runtime)?;
    let environment = runtime.environment();
    logging::init_logging(&config.observability, environment)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %environment,
        "VaaS hook starting"
    );

    if config.observability.metrics_enabled {
        let raw = &config.observability.metrics_address;
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let hook = VaasHook::with_runtime(config, Arc::new(runtime))?;

    tracing::info!(
        api_host = %config.vaas.api_host,
        poll_interval_ms = config.polling.interval_ms,
        max_wait_secs = config.polling.max_wait_secs,
        "Configuration loaded"
    );

    Ok(hook)
}
