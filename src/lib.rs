//! VaaS backend lifecycle hook library.

pub mod config;
pub mod hook;
pub mod lifecycle;
pub mod observability;
pub mod runenv;
pub mod task;
pub mod vaas;

pub use config::schema::HookConfig;
pub use hook::{EventKind, HookError, LifecycleEvent, VaasHook};
pub use lifecycle::Shutdown;
pub use task::TaskInfo;
