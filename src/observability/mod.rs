//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! hook, poller, VaaS client produce:
//!     → logging.rs (structured log events, span per lifecycle event)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr (JSON or compact)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
