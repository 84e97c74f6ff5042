//! Lifecycle events delivered by the executor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::TaskInfo;

/// Kind of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "BeforeTaskStartEvent")]
    BeforeTaskStart,
    #[serde(rename = "AfterTaskHealthyEvent")]
    AfterTaskHealthy,
    #[serde(rename = "BeforeTerminateEvent")]
    BeforeTerminate,
    #[serde(rename = "AfterTerminateEvent")]
    AfterTerminate,
    /// Any kind this build does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::BeforeTaskStart => "BeforeTaskStartEvent",
            EventKind::AfterTaskHealthy => "AfterTaskHealthyEvent",
            EventKind::BeforeTerminate => "BeforeTerminateEvent",
            EventKind::AfterTerminate => "AfterTerminateEvent",
            EventKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Event for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub task_info: TaskInfo,
}

impl LifecycleEvent {
    pub fn new(kind: EventKind, task_info: TaskInfo) -> Self {
        Self { kind, task_info }
    }
}
