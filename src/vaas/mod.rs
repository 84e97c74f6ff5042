//! VaaS control-plane integration.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     datacenter symbol → datacenter()  → Datacenter
//!     director name     → director_id() → numeric id
//!     BackendSpec       → add_backend() → Submission (id, task URI if queued)
//!
//! Queued change:
//!     PendingTask → task_status() → Pending | Success | Failure
//!
//! Deregistration:
//!     BackendId → delete_backend()
//! ```
//!
//! # Design Decisions
//! - The hook only sees the `ControlPlane` trait; `VaasClient` is one implementation
//! - Every call has a request timeout
//! - API credentials come from configuration/environment and are never logged

use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::VaasClient;
pub use types::{
    BackendId, BackendSpec, Datacenter, PendingTask, Submission, SubmitMode, TaskStatus,
    VaasError, VaasResult,
};

/// Operations the hook needs from the load-balancer control plane.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Resolve a datacenter descriptor by its symbol.
    async fn datacenter(&self, symbol: &str) -> VaasResult<Datacenter>;

    /// Resolve the numeric id of a director by name.
    async fn director_id(&self, name: &str) -> VaasResult<u64>;

    /// Create a backend, either inline or queued.
    async fn add_backend(&self, spec: &BackendSpec, mode: SubmitMode) -> VaasResult<Submission>;

    /// Delete a backend.
    async fn delete_backend(&self, id: BackendId) -> VaasResult<()>;

    /// Refresh `task.status` and `task.info` from the control plane.
    async fn task_status(&self, task: &mut PendingTask) -> VaasResult<()>;
}
