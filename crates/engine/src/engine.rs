//! Triage engine facade
//!
//! Owns one validated [`ScoringConfig`] and the components built from it.
//! Stateless per request, so a single instance is shared across handlers.

use serde::Serialize;
use std::sync::Arc;

use lead_triage_config::{ConfigError, ScoringConfig};
use lead_triage_core::{LeadScoreRequest, LeadScoreResponse, LeadScorer, LeadTag, SignalSet};

use crate::escalation;
use crate::reasons::ReasonReporter;
use crate::scoring::{ScoreBreakdown, ScoringFunction};
use crate::signals::SignalExtractor;
use crate::tags::TagClassifier;

/// Everything the pipeline derived for one request
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub signals: SignalSet,
    pub breakdown: ScoreBreakdown,
    pub tag: LeadTag,
    pub escalate: bool,
    pub reasons: Vec<String>,
}

impl TriageOutcome {
    pub fn score(&self) -> f64 {
        self.breakdown.total
    }

    pub fn into_response(self) -> LeadScoreResponse {
        LeadScoreResponse {
            score: self.breakdown.total,
            tag: self.tag,
            reasons: self.reasons,
            escalate: self.escalate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriageEngine {
    config: Arc<ScoringConfig>,
    extractor: SignalExtractor,
    scoring: ScoringFunction,
    classifier: TagClassifier,
    reporter: ReasonReporter,
}

impl TriageEngine {
    /// Validate `config` and build the pipeline
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: ScoringConfig) -> Self {
        let config = Arc::new(config);
        Self {
            extractor: SignalExtractor::new(Arc::clone(&config)),
            scoring: ScoringFunction::new(config.weights.clone(), config.levels.clone()),
            classifier: TagClassifier::new(config.tag_thresholds.clone()),
            reporter: ReasonReporter::new(config.min_reason_contribution),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn extract(&self, request: &LeadScoreRequest) -> SignalSet {
        self.extractor
            .extract(&request.chat_history, &request.preferences)
    }

    pub fn evaluate(&self, request: &LeadScoreRequest) -> TriageOutcome {
        let signals = self.extract(request);
        let breakdown = self.scoring.score(&signals);
        let tag = self.classifier.classify(breakdown.total);
        let escalate = escalation::decide(tag);
        let reasons = self.reporter.report(&signals, &breakdown);

        tracing::debug!(
            score = breakdown.total,
            tag = %tag,
            escalate,
            urgency = ?signals.urgency_level,
            budget_tier = signals.budget_tier.as_str(),
            intent_confidence = signals.intent_confidence,
            "Lead evaluated"
        );

        TriageOutcome {
            signals,
            breakdown,
            tag,
            escalate,
            reasons,
        }
    }
}

impl Default for TriageEngine {
    /// Built-in tables, which always validate
    fn default() -> Self {
        Self::assemble(ScoringConfig::default())
    }
}

impl LeadScorer for TriageEngine {
    fn score_lead(&self, request: &LeadScoreRequest) -> LeadScoreResponse {
        self.evaluate(request).into_response()
    }

    fn name(&self) -> &str {
        "triage_engine"
    }
}
