//! Lead Triage Engine
//!
//! Converts a raw chat/preference request into a priority score, a tag
//! and an escalation decision. Single pass, no retained state:
//!
//! ```text
//! request → SignalExtractor → ScoringFunction → TagClassifier
//!                                             → escalation::decide + ReasonReporter
//! ```
//!
//! All tables come from [`lead_triage_config::ScoringConfig`], validated
//! once when the engine is built.

pub mod engine;
pub mod escalation;
pub mod reasons;
pub mod scoring;
pub mod signals;
pub mod tags;
mod text;

pub use engine::{TriageEngine, TriageOutcome};
pub use reasons::{ReasonReporter, FALLBACK_REASON};
pub use scoring::{ScoreBreakdown, ScoringFunction};
pub use signals::SignalExtractor;
pub use tags::TagClassifier;
