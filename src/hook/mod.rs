//! VaaS backend lifecycle hook.
//!
//! # Data Flow
//! ```text
//! LifecycleEvent
//!     → handle_event (dispatch on kind)
//!         AfterTaskHealthy → register.rs
//!             → resolve datacenter + director
//!             → build BackendSpec
//!             → sync: add_backend
//!             → async: add_backend + poller.rs until Success/Failure/deadline
//!         BeforeTerminate  → deregister.rs (delete stored backend id)
//!         anything else    → ignored
//! ```
//!
//! # Design Decisions
//! - One hook value owns exactly one backend lifecycle
//! - Backend id is set on submission and cleared only on confirmed deletion
//! - A failed async registration keeps its id so deregistration can clean up
//! - `&mut self` serializes register/deregister on a hook

use std::sync::Arc;
use tracing::Instrument;

pub mod deregister;
pub mod error;
pub mod events;
pub mod poller;
pub mod register;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{HookError, PollError};
pub use events::{EventKind, LifecycleEvent};
pub use poller::StatusPoller;

use crate::config::HookConfig;
use crate::runenv::{RuntimeFacts, SystemRuntime};
use crate::vaas::{BackendId, ControlPlane, VaasClient};

/// Keeps a VaaS backend in sync with the lifecycle of one task.
pub struct VaasHook {
    client: Arc<dyn ControlPlane>,
    runtime: Arc<dyn RuntimeFacts>,
    poller: StatusPoller,
    backend_id: Option<BackendId>,
}

impl VaasHook {
    pub fn new(
        client: Arc<dyn ControlPlane>,
        runtime: Arc<dyn RuntimeFacts>,
        poller: StatusPoller,
    ) -> Self {
        Self {
            client,
            runtime,
            poller,
            backend_id: None,
        }
    }

    /// Build a hook talking to the VaaS API described by `config`.
    pub fn from_config(config: &HookConfig) -> Result<Self, HookError> {
        let runtime = SystemRuntime::from_config(&config.runtime)?;
        Self::with_runtime(config, Arc::new(runtime))
    }

    /// Like [`VaasHook::from_config`], with host facts supplied by the caller.
    pub fn with_runtime(
        config: &HookConfig,
        runtime: Arc<dyn RuntimeFacts>,
    ) -> Result<Self, HookError> {
        let client = VaasClient::new(config.vaas.clone()).map_err(HookError::Client)?;
        Ok(Self::new(
            Arc::new(client),
            runtime,
            StatusPoller::from_config(&config.polling),
        ))
    }

    /// Id of the currently registered backend.
    pub fn backend_id(&self) -> Option<BackendId> {
        self.backend_id
    }

    /// Run the hook action for `event`. Unsupported kinds are ignored.
    pub async fn handle_event(&mut self, event: &LifecycleEvent) -> Result<(), HookError> {
        let span = tracing::info_span!(
            "vaas_hook",
            event = %event.kind,
            task_id = %event.task_info.task_id
        );

        async move {
            match event.kind {
                EventKind::AfterTaskHealthy => self.register(&event.task_info).await,
                EventKind::BeforeTerminate => self.deregister(&event.task_info).await,
                other => {
                    tracing::debug!(event = %other, "Received unsupported event type - ignoring");
                    Ok(())
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for VaasHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaasHook")
            .field("poller", &self.poller)
            .field("backend_id", &self.backend_id)
            .finish()
    }
}
