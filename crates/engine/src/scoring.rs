//! Weighted scoring of extracted signals

use serde::Serialize;

use lead_triage_config::{LevelScores, SignalWeights};
use lead_triage_core::{SignalKind, SignalSet};

/// Per-signal weighted contributions and their clamped total
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub urgency: f64,
    pub intent: f64,
    pub budget: f64,
    pub location: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn contribution(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Urgency => self.urgency,
            SignalKind::Intent => self.intent,
            SignalKind::Budget => self.budget,
            SignalKind::Location => self.location,
        }
    }

    /// Contributions in [`SignalKind::ALL`] order
    pub fn contributions(&self) -> [(SignalKind, f64); 4] {
        SignalKind::ALL.map(|kind| (kind, self.contribution(kind)))
    }
}

/// Linear combination of normalized signal values
#[derive(Debug, Clone)]
pub struct ScoringFunction {
    weights: SignalWeights,
    levels: LevelScores,
}

impl ScoringFunction {
    pub fn new(weights: SignalWeights, levels: LevelScores) -> Self {
        Self { weights, levels }
    }

    pub fn score(&self, signals: &SignalSet) -> ScoreBreakdown {
        let intent_value = if signals.intent_confidence.is_nan() {
            0.0
        } else {
            signals.intent_confidence.clamp(0.0, 1.0)
        };

        let urgency = self.weights.urgency * self.levels.urgency_score(signals.urgency_level);
        let intent = self.weights.intent * intent_value;
        let budget = self.weights.budget
            * self
                .levels
                .budget_score(signals.budget_tier, signals.has_budget);
        let location =
            self.weights.location * self.levels.location_score(signals.location_specificity);

        let sum = urgency + intent + budget + location;
        let total = if sum.is_finite() { sum.clamp(0.0, 1.0) } else { 0.0 };

        ScoreBreakdown {
            urgency,
            intent,
            budget,
            location,
            total,
        }
    }
}
