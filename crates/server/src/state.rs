//! Application State
//!
//! Shared state across all handlers.

use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use lead_triage_config::{load_settings_from, Settings};
use lead_triage_core::LeadScorer;
use lead_triage_engine::TriageEngine;

use crate::ServerError;

/// Settings and the scorer built from them, swapped together
struct Live {
    settings: Settings,
    scorer: Arc<dyn LeadScorer>,
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Hot-reloadable configuration and scorer behind one lock
    live: Arc<RwLock<Live>>,
    /// Serializes reloads so the last reload applied is the last one read
    reload_lock: Arc<Mutex<()>>,
    /// Environment name for config reload
    env: Option<String>,
    config_dir: PathBuf,
    started_at: Instant,
}

impl AppState {
    /// Build a triage engine from `config.scoring`
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        Self::with_env(config, None)
    }

    /// Create application state with environment name for reload support
    pub fn with_env(config: Settings, env: Option<String>) -> Result<Self, ServerError> {
        let engine = TriageEngine::new(config.scoring.clone())?;
        Ok(Self::with_scorer(config, Arc::new(engine)).env(env))
    }

    /// Use a caller-supplied scorer
    pub fn with_scorer(config: Settings, scorer: Arc<dyn LeadScorer>) -> Self {
        Self {
            live: Arc::new(RwLock::new(Live {
                settings: config,
                scorer,
            })),
            reload_lock: Arc::new(Mutex::new(())),
            env: None,
            config_dir: PathBuf::from("config"),
            started_at: Instant::now(),
        }
    }

    fn env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }

    /// Directory reloads read from
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Reload configuration from files and rebuild the engine.
    ///
    /// On any failure the current configuration and engine stay in place.
    pub fn reload_config(&self) -> Result<(), ServerError> {
        let _reloading = self.reload_lock.lock();

        let settings = load_settings_from(&self.config_dir, self.env.as_deref())?;
        let scorer: Arc<dyn LeadScorer> = Arc::new(TriageEngine::new(settings.scoring.clone())?);

        *self.live.write() = Live { settings, scorer };

        tracing::info!(
            config_dir = %self.config_dir.display(),
            "Configuration reloaded successfully"
        );
        Ok(())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> MappedRwLockReadGuard<'_, Settings> {
        RwLockReadGuard::map(self.live.read(), |live| &live.settings)
    }

    /// Current scorer; the lock is released before scoring
    pub fn scorer(&self) -> Arc<dyn LeadScorer> {
        Arc::clone(&self.live.read().scorer)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_triage_core::{LeadScoreRequest, LeadScoreResponse, LeadTag, LeadPreferences};
    use std::fs;

    struct FixedScorer;

    impl LeadScorer for FixedScorer {
        fn score_lead(&self, _request: &LeadScoreRequest) -> LeadScoreResponse {
            LeadScoreResponse {
                score: 1.0,
                tag: LeadTag::Hot,
                reasons: vec!["fixed".to_string()],
                escalate: true,
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_new_rejects_invalid_scoring() {
        let mut settings = Settings::default();
        settings.scoring.weights.urgency = 0.9;
        assert!(matches!(AppState::new(settings), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_reload_replaces_engine() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.yaml"), "server:\n  port: 9300\n").unwrap();

        let state = AppState::with_scorer(Settings::default(), Arc::new(FixedScorer))
            .with_config_dir(dir.path());
        assert_eq!(state.scorer().name(), "fixed");

        state.reload_config().unwrap();
        assert_eq!(state.scorer().name(), "triage_engine");
        assert_eq!(state.get_config().server.port, 9300);
    }

    #[test]
    fn test_failed_reload_keeps_previous_engine() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "scoring:\n  weights:\n    urgency: 0.9\n",
        )
        .unwrap();

        let state = AppState::with_scorer(Settings::default(), Arc::new(FixedScorer))
            .with_config_dir(dir.path());
        assert!(state.reload_config().is_err());
        assert_eq!(state.scorer().name(), "fixed");
        assert_eq!(state.get_config().server.port, 8000);

        let response = state
            .scorer()
            .score_lead(&LeadScoreRequest::new("hi", LeadPreferences::default()));
        assert_eq!(response.tag, LeadTag::Hot);
    }

    #[test]
    fn test_concurrent_reloads_keep_settings_and_scorer_paired() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("default.yaml");
        let variants = [
            "scoring:\n  tag_thresholds:\n    hot: 0.5\n    warm: 0.3\n",
            "scoring:\n  tag_thresholds:\n    hot: 0.7\n    warm: 0.4\n",
        ];
        fs::write(&config_file, variants[0]).unwrap();

        let state = AppState::new(Settings::default())
            .unwrap()
            .with_config_dir(dir.path());

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let state = state.clone();
                scope.spawn(move || {
                    for _ in 0..25 {
                        let _ = state.reload_config();
                    }
                });
            }
            for round in 0..50 {
                // Rename keeps every read of the file whole
                let staged = dir.path().join("staged.yaml.tmp");
                fs::write(&staged, variants[round % 2]).unwrap();
                fs::rename(&staged, &config_file).unwrap();
            }
        });
        state.reload_config().unwrap();

        // Scores 0.62: hot only under the 0.5 threshold
        let request = LeadScoreRequest::new(
            "I need to move in ASAP, budget is tight",
            LeadPreferences::default(),
        );
        let hot_threshold = state.get_config().scoring.tag_thresholds.hot;
        let tag = state.scorer().score_lead(&request).tag;
        let expected = if hot_threshold <= 0.62 { LeadTag::Hot } else { LeadTag::Warm };
        assert_eq!(tag, expected);
    }
}
