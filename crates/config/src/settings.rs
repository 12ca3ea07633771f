//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{env, server};
use crate::{ConfigError, ScoringConfig};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Scoring tables
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Standalone scoring YAML; replaces `scoring` when set
    #[serde(default)]
    pub scoring_config_path: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.scoring.validate()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "Port must be non-zero"));
        }

        if self.server.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "server.timeout_seconds",
                "Timeout must be at least 1 second",
            ));
        }

        if self.environment.is_production() && !self.server.cors_enabled {
            return Err(ConfigError::invalid(
                "server.cors_enabled",
                "CORS cannot be disabled in production",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    server::DEFAULT_PORT
}

fn default_timeout() -> u64 {
    server::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` and the environment
pub fn load_settings(env_name: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env_name)
}

/// Load settings from a config directory.
///
/// Priority: env vars > {dir}/{env}.* > {dir}/default.* > defaults.
/// A configured `scoring_config_path` then replaces the scoring section.
pub fn load_settings_from(config_dir: &Path, env_name: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_file = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_file.to_string_lossy()).required(false));

    if let Some(env_name) = env_name {
        let env_file = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_file.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(env::PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;

    if let Some(path) = settings.scoring_config_path.as_deref() {
        let path = resolve_path(config_dir, path);
        settings.scoring = ScoringConfig::load(&path)?;
        tracing::info!(path = %path.display(), "Using standalone scoring configuration");
    }

    settings.validate()?;

    Ok(settings)
}

/// Relative scoring paths are taken relative to the config directory
fn resolve_path(config_dir: &Path, path: &str) -> std::path::PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert!(settings.server.cors_enabled);
        assert!(settings.observability.metrics_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.server.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        settings.server.timeout_seconds = 10;
        assert!(settings.validate().is_ok());

        settings.scoring.tag_thresholds.warm = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_production_requires_cors() {
        let mut settings = Settings::default();
        settings.environment = RuntimeEnvironment::Production;
        settings.server.cors_enabled = false;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_settings_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9100\nscoring:\n  tag_thresholds:\n    hot: 0.8\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.yaml"), "environment: staging\n").unwrap();

        let settings = load_settings_from(dir.path(), Some("staging")).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.environment, RuntimeEnvironment::Staging);
        assert_eq!(settings.scoring.tag_thresholds.hot, 0.8);
        assert_eq!(settings.scoring.tag_thresholds.warm, 0.4);
    }

    #[test]
    fn test_load_settings_with_scoring_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "scoring_config_path: scoring.yaml\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("scoring.yaml"),
            "min_reason_contribution: 0.2\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.scoring.min_reason_contribution, 0.2);
    }

    #[test]
    fn test_load_settings_fails_fast_on_bad_weights() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "scoring:\n  weights:\n    urgency: 0.9\n",
        )
        .unwrap();

        let err = load_settings_from(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_shipped_config_directory() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let settings = load_settings_from(&dir, Some("production")).unwrap();
        assert!(settings.environment.is_production());
        assert!(settings.observability.log_json);
        assert_eq!(settings.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_relative_scoring_path_ignores_working_directory() {
        // Cargo runs tests from the crate root, where Cargo.toml exists
        assert!(Path::new("Cargo.toml").exists());
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_path(dir.path(), "Cargo.toml"), dir.path().join("Cargo.toml"));

        let absolute = dir.path().join("scoring.yaml");
        assert_eq!(resolve_path(Path::new("config"), &absolute.to_string_lossy()), absolute);
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("absent"), None).unwrap();
        assert_eq!(settings.server.port, 8000);
    }
}
