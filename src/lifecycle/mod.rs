//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging → Metrics → Build hook
//!
//! Run (runner.rs):
//!     stdin JSON lines → LifecycleEvent → hook.handle_event
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT or EOF → stop reading → release backend → exit
//! ```

pub mod runner;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use runner::{run_events, RunSummary};
pub use shutdown::Shutdown;
