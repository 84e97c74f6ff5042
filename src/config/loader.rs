//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use crate::config::schema::HookConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "VAAS_HOOK_";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from an optional TOML file, apply environment
/// overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<HookConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => HookConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Override file values with `VAAS_HOOK_*` variables resolved by `lookup`.
pub fn apply_env_overrides<F>(config: &mut HookConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.is_empty());

    if let Some(host) = var("API_HOST") {
        config.vaas.api_host = host;
    }
    if let Some(username) = var("USERNAME") {
        config.vaas.username = username;
    }
    if let Some(key) = var("API_KEY") {
        config.vaas.api_key = key;
    }
    if let Some(dc) = var("DATACENTER") {
        config.runtime.datacenter = Some(dc);
    }
    if let Some(environment) = var("ENVIRONMENT") {
        config.runtime.environment = environment;
    }
    if let Some(debug) = var("DEBUG") {
        config.observability.debug =
            matches!(debug.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }
}
