//! Escalation policy

use lead_triage_core::LeadTag;

/// Hot leads go straight to a human agent
pub fn decide(tag: LeadTag) -> bool {
    matches!(tag, LeadTag::Hot)
}
