//! Engine configuration.
//!
//! Configuration is resolved once at process start-up and handed to [`crate::RiskEngine`].
//! Nothing in the engine reads environment variables, so two engines built with different
//! versions can run side by side in the same process.

use crate::constants::CALCULATION_VERSION;
use crate::error::ConfigError;

/// Engine configuration resolved at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    calculation_version: String,
}

impl EngineConfig {
    /// Create a new `EngineConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if `calculation_version` is empty or whitespace.
    pub fn new(calculation_version: impl Into<String>) -> Result<Self, ConfigError> {
        let calculation_version = calculation_version.into().trim().to_string();
        if calculation_version.is_empty() {
            return Err(ConfigError::InvalidInput(
                "calculation_version cannot be empty".into(),
            ));
        }

        Ok(Self {
            calculation_version,
        })
    }

    /// Version tag stamped into every assessment produced with this configuration.
    pub fn calculation_version(&self) -> &str {
        &self.calculation_version
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calculation_version: CALCULATION_VERSION.to_string(),
        }
    }
}

/// Build a configuration from an optional override value.
///
/// If `value` is `None` or empty/whitespace, the built-in [`CALCULATION_VERSION`] is used.
pub fn engine_config_from_env_value(value: Option<String>) -> Result<EngineConfig, ConfigError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(version) => EngineConfig::new(version),
        None => Ok(EngineConfig::default()),
    }
}
