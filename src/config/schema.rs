//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the hook.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the VaaS hook.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HookConfig {
    /// VaaS API connection settings.
    pub vaas: VaasConfig,

    /// Async registration polling.
    pub polling: PollingConfig,

    /// Runtime facts overrides (address, datacenter, environment).
    pub runtime: RuntimeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// VaaS API connection settings.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VaasConfig {
    /// Base URL of the VaaS API (e.g., "http://vaas.example.com").
    pub api_host: String,

    /// API user name.
    pub username: String,

    /// API key. Prefer `VAAS_HOOK_API_KEY` over writing it to disk.
    pub api_key: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for VaasConfig {
    fn default() -> Self {
        Self {
            api_host: "http://localhost:3030".to_string(),
            username: String::new(),
            api_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl std::fmt::Debug for VaasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaasConfig")
            .field("api_host", &self.api_host)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Polling of queued (async) VaaS changes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between task status checks in milliseconds.
    pub interval_ms: u64,

    /// Maximum time to wait for a terminal task state in seconds.
    pub max_wait_secs: u64,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_wait_secs: 90,
        }
    }
}

/// Runtime facts. Unset values are detected or read from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Address to register instead of the detected one.
    pub address: Option<String>,

    /// Datacenter symbol of this host.
    pub datacenter: Option<String>,

    /// Deployment environment (local, dev, test, prod).
    pub environment: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            address: None,
            datacenter: None,
            environment: "local".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Force debug logging regardless of `log_level`.
    pub debug: bool,

    /// JSON logs. Defaults to JSON everywhere except the local environment.
    pub json_logs: Option<bool>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: false,
            json_logs: None,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9190".to_string(),
        }
    }
}
