//! Centralized constants

/// HTTP routes
pub mod routes {
    /// Canonical scoring route
    pub const LEAD_SCORE: &str = "/api/leads/score";
    /// Deprecated alias still called by older UI hooks
    pub const LEAD_SCORE_ALIAS: &str = "/api/score-lead";
    pub const HEALTH: &str = "/health";
    /// Legacy health path
    pub const HEALTHCHECK: &str = "/healthcheck";
    pub const METRICS: &str = "/metrics";
    pub const RELOAD_CONFIG: &str = "/admin/reload-config";
}

/// Environment variable names
pub mod env {
    /// Prefix for settings overrides, e.g. `LEAD_TRIAGE__SERVER__PORT`
    pub const PREFIX: &str = "LEAD_TRIAGE";
    /// Selects `config/{env}.*`
    pub const ENVIRONMENT: &str = "LEAD_TRIAGE_ENV";
}

/// Server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
}

/// Tolerance when checking that signal weights sum to one
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
