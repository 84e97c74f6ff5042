//! Runtime environment facts.
//!
//! # Responsibilities
//! - Report the address other hosts reach this instance on
//! - Report the datacenter this host lives in
//! - Report the deployment environment (drives log format)

use std::fmt;
use std::net::{IpAddr, UdpSocket};
use std::str::FromStr;
use thiserror::Error;

use crate::config::RuntimeConfig;

/// Environment variable consulted when no datacenter is configured.
pub const DATACENTER_ENV: &str = "VAAS_HOOK_DATACENTER";

/// Deployment environment of the running host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(RuntimeError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Errors raised while discovering runtime facts.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("datacenter not configured (set runtime.datacenter or VAAS_HOOK_DATACENTER)")]
    MissingDatacenter,

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("unable to detect local address: {0}")]
    AddressDetection(#[from] std::io::Error),

    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),
}

/// Facts about the host the instance runs on.
pub trait RuntimeFacts: Send + Sync {
    /// Address to register with the load balancer.
    fn address(&self) -> Result<IpAddr, RuntimeError>;

    /// Datacenter symbol of this host.
    fn datacenter(&self) -> Result<String, RuntimeError>;

    fn environment(&self) -> Environment;
}

/// Runtime facts from configuration, falling back to host detection.
#[derive(Debug, Clone)]
pub struct SystemRuntime {
    address: Option<String>,
    datacenter: Option<String>,
    environment: Environment,
}

impl SystemRuntime {
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, RuntimeError> {
        Ok(Self {
            address: config.address.clone(),
            datacenter: config.datacenter.clone(),
            environment: config.environment.parse()?,
        })
    }
}

impl RuntimeFacts for SystemRuntime {
    fn address(&self) -> Result<IpAddr, RuntimeError> {
        match &self.address {
            Some(address) => address
                .parse()
                .map_err(|_| RuntimeError::InvalidAddress(address.clone())),
            None => detect_outbound_address(),
        }
    }

    fn datacenter(&self) -> Result<String, RuntimeError> {
        self.datacenter
            .clone()
            .or_else(|| std::env::var(DATACENTER_ENV).ok())
            .filter(|dc| !dc.is_empty())
            .ok_or(RuntimeError::MissingDatacenter)
    }

    fn environment(&self) -> Environment {
        self.environment
    }
}

/// Address of the interface used for outbound traffic.
///
/// Connecting a UDP socket only selects a route; nothing is sent.
fn detect_outbound_address() -> Result<IpAddr, RuntimeError> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.connect("8.8.8.8:53")?;
    Ok(socket.local_addr()?.ip())
}
