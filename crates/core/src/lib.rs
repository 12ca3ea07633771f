//! Core traits and types for lead triage
//!
//! This crate provides the types shared by every other crate:
//! - Wire types for the lead scoring contract (request/response)
//! - Signal levels derived from a request
//! - The `LeadScorer` trait that HTTP handlers depend on

pub mod lead;
pub mod signals;
pub mod traits;

pub use lead::{LeadIntent, LeadPreferences, LeadScoreRequest, LeadScoreResponse, LeadTag};
pub use signals::{BudgetTier, LocationSpecificity, SignalKind, SignalSet, UrgencyLevel};
pub use traits::LeadScorer;
