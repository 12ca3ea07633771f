//! Core traits for lead triage
//!
//! ```text
//! Scoring:
//!   - LeadScorer: LeadScoreRequest → LeadScoreResponse
//! ```

mod scoring;

pub use scoring::LeadScorer;
