//! VaaS resource types and error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// Re-export VaasConfig from config module to avoid duplication
pub use crate::config::schema::VaasConfig;

/// API prefix for every VaaS resource.
pub const API_PREFIX: &str = "/api/v0.1/";

/// Path prefix used to reference a director from a backend.
pub const API_DIRECTOR_PATH: &str = "/api/v0.1/director/";

/// Tag VaaS requires on every canary instance.
pub const CANARY_TAG: &str = "canary";

/// Identifier assigned to a backend by VaaS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(pub u64);

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Datacenter as described by VaaS. Passed back untouched in backend specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// Backend definition submitted to VaaS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSpec {
    pub address: String,
    /// Director reference, e.g. `/api/v0.1/director/42/`.
    pub director: String,
    /// Initial weight. Omitted to let VaaS apply its default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub dc: Datacenter,
    pub port: u16,
    pub inherit_time_profile: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Format the director reference for a resolved director id.
pub fn director_reference(director_id: u64) -> String {
    format!("{}{}/", API_DIRECTOR_PATH, director_id)
}

/// Whether a backend is created inline or queued by VaaS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Sync,
    Async,
}

/// Result of a successful backend submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Backend id. On the async path this is the id of the queued backend,
    /// not yet confirmed active.
    pub backend_id: BackendId,
    /// Task resource to poll. Absent for sync submissions and for async
    /// ones VaaS answered without a `Location` header.
    pub task_uri: Option<String>,
}

/// State of a queued VaaS change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Success,
    Failure,
}

impl TaskStatus {
    /// Success and Failure end the poll loop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Success => "success",
            TaskStatus::Failure => "failure",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-flight asynchronous change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTask {
    pub resource_uri: String,
    pub status: TaskStatus,
    pub info: Option<String>,
}

impl PendingTask {
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
            status: TaskStatus::Pending,
            info: None,
        }
    }
}

/// Task status document returned by VaaS.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskReport {
    pub status: TaskStatus,
    #[serde(default)]
    pub info: Option<String>,
}

/// Errors that can occur while talking to VaaS.
#[derive(Debug, Error)]
pub enum VaasError {
    /// Transport failure or request timeout.
    #[error("VaaS request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// VaaS answered with a non-success status.
    #[error("VaaS returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("director '{0}' not found in VaaS")]
    DirectorNotFound(String),

    #[error("datacenter '{0}' not found in VaaS")]
    DatacenterNotFound(String),

    /// Async submission accepted without a task location.
    #[error("VaaS accepted async request without a Location header")]
    MissingLocation,

    #[error("invalid VaaS URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unexpected VaaS response: {0}")]
    Decode(String),
}

/// Result type for VaaS operations.
pub type VaasResult<T> = Result<T, VaasError>;
