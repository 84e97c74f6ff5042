//! Typed queries over task metadata.
//!
//! Unset labels (`None`) are distinguishable from labels set to an empty
//! string (`Some("")`).

use thiserror::Error;

use crate::task::info::{Port, TaskInfo};

/// Director the backend should be attached to.
pub const DIRECTOR_LABEL: &str = "director";
/// Initial backend weight.
pub const WEIGHT_LABEL: &str = "weight";
/// Marks a canary instance.
pub const CANARY_LABEL: &str = "canary";
/// `"true"` selects queued (async) registration.
pub const ASYNC_LABEL: &str = "vaas-queue";
/// Environment variable overriding the weight label.
pub const INITIAL_WEIGHT_ENV: &str = "VAAS_INITIAL_WEIGHT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("label '{0}' not set")]
    MissingLabel(&'static str),

    #[error("label '{key}' has non-integer value '{value}'")]
    InvalidInteger { key: &'static str, value: String },
}

impl TaskInfo {
    /// Value of the first label with the given key. Valueless labels read as `""`.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.key == key)
            .map(|label| label.value.as_deref().unwrap_or(""))
    }

    /// Director name, if configured and non-empty.
    pub fn director(&self) -> Option<&str> {
        self.label(DIRECTOR_LABEL).filter(|name| !name.is_empty())
    }

    /// Weight from the weight label. Any integer is accepted; VaaS owns range checks.
    pub fn weight(&self) -> Result<i64, MetadataError> {
        let value = self
            .label(WEIGHT_LABEL)
            .ok_or(MetadataError::MissingLabel(WEIGHT_LABEL))?;
        value.parse().map_err(|_| MetadataError::InvalidInteger {
            key: WEIGHT_LABEL,
            value: value.to_string(),
        })
    }

    pub fn is_canary(&self) -> bool {
        self.label(CANARY_LABEL).is_some_and(|value| !value.is_empty())
    }

    pub fn async_registration(&self) -> bool {
        self.label(ASYNC_LABEL) == Some("true")
    }

    /// Ports advertised through discovery info.
    pub fn ports(&self) -> &[Port] {
        self.discovery
            .as_ref()
            .map(|discovery| discovery.ports.as_slice())
            .unwrap_or_default()
    }

    /// Value of a variable in the task's command environment.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.command
            .as_ref()?
            .environment
            .iter()
            .find(|var| var.name == name)
            .map(|var| var.value.as_str())
    }
}
