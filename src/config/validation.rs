//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, interval shorter than deadline)
//! - Check URLs and addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HookConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use url::Url;

use crate::config::schema::HookConfig;
use crate::runenv::Environment;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &HookConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.vaas.api_host) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "vaas.api_host",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("vaas.api_host", e.to_string())),
    }

    if config.vaas.username.is_empty() {
        errors.push(ValidationError::new("vaas.username", "must be set"));
    }

    if config.vaas.request_timeout_secs == 0 {
        errors.push(ValidationError::new("vaas.request_timeout_secs", "must be > 0"));
    }

    if config.polling.interval_ms == 0 {
        errors.push(ValidationError::new("polling.interval_ms", "must be > 0"));
    }

    if config.polling.max_wait_secs == 0 {
        errors.push(ValidationError::new("polling.max_wait_secs", "must be > 0"));
    } else if config.polling.interval() >= config.polling.max_wait() {
        errors.push(ValidationError::new(
            "polling.interval_ms",
            "must be shorter than polling.max_wait_secs",
        ));
    }

    if let Some(address) = &config.runtime.address {
        if address.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::new(
                "runtime.address",
                format!("'{}' is not an IP address", address),
            ));
        }
    }

    if config.runtime.environment.parse::<Environment>().is_err() {
        errors.push(ValidationError::new(
            "runtime.environment",
            format!("unknown environment '{}'", config.runtime.environment),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
