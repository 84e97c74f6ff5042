//! Hook error definitions.

use std::time::Duration;
use thiserror::Error;

use crate::runenv::RuntimeError;
use crate::vaas::{BackendId, VaasError};

/// Outcome of waiting on a queued VaaS change that did not succeed.
#[derive(Debug, Error)]
pub enum PollError {
    /// VaaS reported the change as failed.
    #[error("registration in VaaS failed: {info}")]
    Failed { info: String },

    /// No terminal state observed before the deadline.
    #[error("VaaS registration timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Errors surfaced by a single hook invocation.
#[derive(Debug, Error)]
pub enum HookError {
    /// Runtime facts (address, datacenter) unavailable.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// VaaS client could not be built from configuration.
    #[error("invalid VaaS client configuration: {0}")]
    Client(#[source] VaasError),

    /// Datacenter or director resolution failed.
    #[error(transparent)]
    ControlPlane(#[from] VaasError),

    #[error("service has no ports available")]
    NoPorts,

    /// VaaS rejected the backend.
    #[error("could not register with VaaS director: {0}")]
    Submit(#[source] VaasError),

    /// Queued registration failed or timed out.
    #[error("could not register with VaaS director: {0}")]
    Await(#[source] PollError),

    #[error("could not delete VaaS backend {id}: {source}")]
    Delete {
        id: BackendId,
        #[source]
        source: VaasError,
    },
}
