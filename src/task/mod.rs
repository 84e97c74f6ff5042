//! Task (service instance) descriptors.
//!
//! # Data Flow
//! ```text
//! Scheduler event JSON
//!     → info.rs (TaskInfo: labels, ports, command environment)
//!     → metadata.rs (typed accessors: director, weight, canary, async mode)
//! ```

pub mod info;
pub mod metadata;

pub use info::{Label, Port, TaskInfo};
pub use metadata::MetadataError;
