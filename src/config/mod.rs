//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → VAAS_HOOK_* environment overrides
//!     → validation.rs (semantic checks)
//!     → HookConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Secrets (API key) may come from the environment only

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::HookConfig;
pub use schema::ObservabilityConfig;
pub use schema::PollingConfig;
pub use schema::RuntimeConfig;
pub use schema::VaasConfig;
