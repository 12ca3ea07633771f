//! Lead scorer trait
//!
//! HTTP handlers hold an `Arc<dyn LeadScorer>` injected through
//! application state, so the scoring implementation can be swapped
//! (or reloaded) without the handlers knowing about it.
//!
//! # Example
//!
//! ```ignore
//! use lead_triage_core::{LeadScorer, LeadScoreRequest};
//!
//! let scorer: Arc<dyn LeadScorer> = Arc::new(engine);
//! let response = scorer.score_lead(&LeadScoreRequest::default());
//! ```

use crate::lead::{LeadScoreRequest, LeadScoreResponse};

/// Pure, synchronous lead scoring.
///
/// Implementations must be deterministic: identical requests yield
/// identical responses. They never fail; degraded input degrades the
/// score instead.
pub trait LeadScorer: Send + Sync {
    fn score_lead(&self, request: &LeadScoreRequest) -> LeadScoreResponse;

    /// Short identifier for logs
    fn name(&self) -> &str {
        "lead_scorer"
    }
}
