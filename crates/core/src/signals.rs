//! Normalized signals derived from a scoring request
//!
//! Every level enum is ordered weakest to strongest, so `a < b` means
//! `b` is the stronger reading of the same signal.

use serde::{Deserialize, Serialize};

use crate::lead::LeadIntent;

/// Budget band a stated or mentioned amount falls into
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    #[default]
    Unknown,
    Low,
    Mid,
    High,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

/// How precisely the lead described where they want to be
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LocationSpecificity {
    #[default]
    None,
    City,
    District,
}

/// How soon the lead wants to act
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    #[default]
    None,
    Low,
    High,
}

/// Signals that feed the scoring function, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Urgency,
    Intent,
    Budget,
    Location,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Urgency,
        SignalKind::Intent,
        SignalKind::Budget,
        SignalKind::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::Intent => "intent",
            Self::Budget => "budget",
            Self::Location => "location",
        }
    }
}

/// Signals extracted from one request.
///
/// Ephemeral: built per call and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub has_budget: bool,
    /// Amount the tier was derived from, when one could be read
    pub budget_amount: Option<f64>,
    pub budget_tier: BudgetTier,
    pub location_specificity: LocationSpecificity,
    pub urgency_level: UrgencyLevel,
    /// Buy/rent/book phrase match strength in [0, 1]
    pub intent_confidence: f64,
    /// Dominant intent among matched phrases
    pub intent: Option<LeadIntent>,
}
