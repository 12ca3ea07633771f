//! Reason Reporter
//!
//! Turns the weighted contributions into agent-facing sentences. One
//! sentence per signal whose contribution clears the reporting threshold,
//! strongest first.

use lead_triage_core::{
    BudgetTier, LeadIntent, LocationSpecificity, SignalKind, SignalSet, UrgencyLevel,
};

use crate::scoring::ScoreBreakdown;

/// Reported when no signal clears the threshold
pub const FALLBACK_REASON: &str = "Insufficient signal for detailed reasoning";

/// Intent confidence at which the reason reads "strong"
const STRONG_INTENT: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct ReasonReporter {
    min_contribution: f64,
}

impl ReasonReporter {
    pub fn new(min_contribution: f64) -> Self {
        Self { min_contribution }
    }

    pub fn report(&self, signals: &SignalSet, breakdown: &ScoreBreakdown) -> Vec<String> {
        let mut reported: Vec<(SignalKind, f64)> = breakdown
            .contributions()
            .into_iter()
            .filter(|(_, contribution)| *contribution > self.min_contribution)
            .collect();

        if reported.is_empty() {
            return vec![FALLBACK_REASON.to_string()];
        }

        // Stable: equal contributions keep SignalKind order
        reported.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        reported
            .into_iter()
            .map(|(kind, _)| describe(kind, signals))
            .collect()
    }
}

fn describe(kind: SignalKind, signals: &SignalSet) -> String {
    match kind {
        SignalKind::Urgency => match signals.urgency_level {
            UrgencyLevel::High => "High urgency detected in conversation",
            UrgencyLevel::Low => "Moderate urgency detected",
            UrgencyLevel::None => "No time pressure indicated",
        }
        .to_string(),
        SignalKind::Intent => describe_intent(signals),
        SignalKind::Budget => match signals.budget_tier {
            BudgetTier::High => "Budget in premium tier",
            BudgetTier::Mid => "Budget in mid-market tier",
            BudgetTier::Low => "Budget in entry-level tier",
            BudgetTier::Unknown if signals.has_budget => "Budget mentioned in conversation",
            BudgetTier::Unknown => "Budget not specified",
        }
        .to_string(),
        SignalKind::Location => match signals.location_specificity {
            LocationSpecificity::District => "Specific district or neighbourhood requested",
            LocationSpecificity::City => "City-level location preference",
            LocationSpecificity::None => "No location preference",
        }
        .to_string(),
    }
}

fn describe_intent(signals: &SignalSet) -> String {
    let strong = signals.intent_confidence >= STRONG_INTENT;
    match (signals.intent, strong) {
        (Some(intent), true) => format!("Strong intent to {}", intent_verb(intent)),
        (Some(intent), false) => format!("Some interest in {}", intent_gerund(intent)),
        (None, true) => "Strong engagement in conversation".to_string(),
        (None, false) => "Some engagement in conversation".to_string(),
    }
}

fn intent_verb(intent: LeadIntent) -> &'static str {
    match intent {
        LeadIntent::Buy => "buy",
        LeadIntent::Rent => "rent",
        LeadIntent::Book => "book a viewing",
    }
}

fn intent_gerund(intent: LeadIntent) -> &'static str {
    match intent {
        LeadIntent::Buy => "buying",
        LeadIntent::Rent => "renting",
        LeadIntent::Book => "booking a viewing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(urgency: f64, intent: f64, budget: f64, location: f64) -> ScoreBreakdown {
        ScoreBreakdown {
            urgency,
            intent,
            budget,
            location,
            total: urgency + intent + budget + location,
        }
    }

    fn reporter() -> ReasonReporter {
        ReasonReporter::new(0.05)
    }

    #[test]
    fn test_fallback_when_nothing_contributes() {
        let reasons = reporter().report(&SignalSet::default(), &ScoreBreakdown::default());
        assert_eq!(reasons, vec![FALLBACK_REASON.to_string()]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let signals = SignalSet {
            urgency_level: UrgencyLevel::Low,
            ..Default::default()
        };
        let reasons = reporter().report(&signals, &breakdown(0.05, 0.0, 0.0, 0.0));
        assert_eq!(reasons, vec![FALLBACK_REASON.to_string()]);
    }

    #[test]
    fn test_ordered_by_contribution() {
        let signals = SignalSet {
            has_budget: true,
            budget_tier: BudgetTier::High,
            location_specificity: LocationSpecificity::City,
            urgency_level: UrgencyLevel::Low,
            ..Default::default()
        };
        let reasons = reporter().report(&signals, &breakdown(0.175, 0.0, 0.2, 0.075));
        assert_eq!(
            reasons,
            vec![
                "Budget in premium tier",
                "Moderate urgency detected",
                "City-level location preference",
            ]
        );
    }

    #[test]
    fn test_ties_keep_signal_order() {
        let signals = SignalSet {
            has_budget: true,
            budget_tier: BudgetTier::Mid,
            location_specificity: LocationSpecificity::District,
            ..Default::default()
        };
        let reasons = reporter().report(&signals, &breakdown(0.0, 0.0, 0.14, 0.14));
        assert_eq!(
            reasons,
            vec![
                "Budget in mid-market tier",
                "Specific district or neighbourhood requested",
            ]
        );
    }

    #[test]
    fn test_intent_wording() {
        let mut signals = SignalSet {
            intent_confidence: 0.9,
            intent: Some(LeadIntent::Rent),
            ..Default::default()
        };
        let contributions = breakdown(0.0, 0.27, 0.0, 0.0);
        assert_eq!(
            reporter().report(&signals, &contributions),
            vec!["Strong intent to rent"]
        );

        signals.intent_confidence = 0.3;
        signals.intent = Some(LeadIntent::Book);
        assert_eq!(
            reporter().report(&signals, &contributions),
            vec!["Some interest in booking a viewing"]
        );

        signals.intent = None;
        assert_eq!(
            reporter().report(&signals, &contributions),
            vec!["Some engagement in conversation"]
        );
    }

    #[test]
    fn test_budget_mentioned_without_tier() {
        let signals = SignalSet {
            has_budget: true,
            ..Default::default()
        };
        let reasons = reporter().report(&signals, &breakdown(0.0, 0.0, 0.06, 0.0));
        assert_eq!(reasons, vec!["Budget mentioned in conversation"]);
    }
}
