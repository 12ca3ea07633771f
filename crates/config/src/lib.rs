//! Configuration management for lead triage
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (`LEAD_TRIAGE__` prefix, `__` separator)
//! - A standalone scoring table (`scoring_config_path`)
//!
//! Everything is validated at load time. A configuration that loads is
//! safe to score with; nothing is re-checked per request.

pub mod constants;
pub mod scoring;
pub mod settings;

pub use scoring::{
    BudgetBand, BudgetScores, IntentPhrase, LevelScores, LocationScores, ScoringConfig,
    SignalWeights, TagThresholds, UrgencyKeywords, UrgencyScores,
};
pub use settings::{
    load_settings, load_settings_from, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}: {reason}")]
    FileNotFound { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
