//! Signal Extractor
//!
//! Parses free-text chat history and structured preferences into a
//! [`SignalSet`]. Never fails: missing or unreadable fields degrade to
//! `none`/`unknown`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lead_triage_config::{IntentPhrase, ScoringConfig};
use lead_triage_core::{
    BudgetTier, LeadIntent, LeadPreferences, LocationSpecificity, SignalSet, UrgencyLevel,
};

use crate::text::{self, Phrase};

/// `$450k`, `$1,200,000`, `$2m`, `1.2 million`, `300k`, `2M`.
///
/// Without a `$` only an uppercase `M` means millions, so "100m" stays a distance.
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$\s*(?P<cur>\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(?P<cur_unit>(?i:k|mm|m|million|thousand))?\b|\b(?P<num>\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)\s*(?P<unit>[kK]|M|(?i:million|thousand))\b",
    )
    .expect("amount pattern is valid")
});

/// A capitalized place name after a locative preposition, e.g. "near Marina Heights"
static PLACE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[Ii]n|[Aa]t|[Nn]ear|[Aa]round)\s+(?P<place>\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)*)")
        .expect("place pattern is valid")
});

#[derive(Debug, Clone)]
struct WeightedPhrase {
    phrase: Phrase,
    intent: Option<LeadIntent>,
    strength: f64,
}

impl From<&IntentPhrase> for WeightedPhrase {
    fn from(entry: &IntentPhrase) -> Self {
        Self {
            phrase: Phrase::new(&entry.phrase),
            intent: entry.intent,
            strength: entry.strength,
        }
    }
}

/// Keyword-driven signal extraction
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    config: Arc<ScoringConfig>,
    high_urgency: Vec<Phrase>,
    low_urgency: Vec<Phrase>,
    /// Lowercased alias → level
    urgency_aliases: HashMap<String, UrgencyLevel>,
    intent_phrases: Vec<WeightedPhrase>,
    budget_keywords: Vec<Phrase>,
    district_keywords: Vec<Phrase>,
    /// Lowercased names that are never places
    place_stopwords: HashSet<String>,
}

impl SignalExtractor {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        let urgency_aliases = config
            .urgency
            .preference_aliases
            .iter()
            .map(|(alias, level)| (alias.trim().to_lowercase(), *level))
            .collect();

        Self {
            high_urgency: text::compile(&config.urgency.high_keywords),
            low_urgency: text::compile(&config.urgency.low_keywords),
            urgency_aliases,
            intent_phrases: config.intent_phrases.iter().map(WeightedPhrase::from).collect(),
            budget_keywords: text::compile(&config.budget_keywords),
            district_keywords: text::compile(&config.district_keywords),
            place_stopwords: config
                .place_stopwords
                .iter()
                .map(|word| word.trim().to_lowercase())
                .collect(),
            config,
        }
    }

    /// Extract all signals from one request
    pub fn extract(&self, chat_history: &str, preferences: &LeadPreferences) -> SignalSet {
        let tokens = text::tokenize(chat_history);

        let budget_amount = preferences
            .budget
            .filter(|b| b.is_finite() && *b > 0.0)
            .or_else(|| amount_in_text(chat_history));
        let has_budget = budget_amount.is_some() || text::any_occurs(&self.budget_keywords, &tokens);
        let budget_tier = budget_amount
            .map(|amount| self.config.budget_tier(amount))
            .unwrap_or(BudgetTier::Unknown);

        let (intent_confidence, intent) = self.intent(&tokens);

        SignalSet {
            has_budget,
            budget_amount,
            budget_tier,
            location_specificity: self
                .location_specificity(preferences.location.as_deref(), chat_history),
            urgency_level: self.urgency_level(&tokens, preferences.urgency.as_deref()),
            intent_confidence,
            intent,
        }
    }

    /// Stronger of the conversation and the stated preference
    fn urgency_level(&self, tokens: &[String], preference: Option<&str>) -> UrgencyLevel {
        let from_chat = self.match_urgency(tokens);

        let from_preference = preference
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| {
                self.urgency_aliases
                    .get(&u.to_lowercase())
                    .copied()
                    .unwrap_or_else(|| self.match_urgency(&text::tokenize(u)))
            })
            .unwrap_or_default();

        from_chat.max(from_preference)
    }

    fn match_urgency(&self, tokens: &[String]) -> UrgencyLevel {
        if text::any_occurs(&self.high_urgency, tokens) {
            UrgencyLevel::High
        } else if text::any_occurs(&self.low_urgency, tokens) {
            UrgencyLevel::Low
        } else {
            UrgencyLevel::None
        }
    }

    /// Noisy-OR of matched phrase strengths plus the dominant intent
    fn intent(&self, tokens: &[String]) -> (f64, Option<LeadIntent>) {
        let mut miss_probability = 1.0_f64;
        let mut per_intent = [0.0_f64; LeadIntent::ALL.len()];

        for entry in self.intent_phrases.iter().filter(|e| e.phrase.occurs_in(tokens)) {
            miss_probability *= 1.0 - entry.strength;
            if let Some(intent) = entry.intent {
                per_intent[intent_index(intent)] += entry.strength;
            }
        }

        let mut dominant: Option<(LeadIntent, f64)> = None;
        for intent in LeadIntent::ALL {
            let strength = per_intent[intent_index(intent)];
            if strength > 0.0 && dominant.map_or(true, |(_, best)| strength > best) {
                dominant = Some((intent, strength));
            }
        }

        let confidence = (1.0 - miss_probability).clamp(0.0, 1.0);
        (confidence, dominant.map(|(intent, _)| intent))
    }

    fn location_specificity(&self, location: Option<&str>, chat_history: &str) -> LocationSpecificity {
        match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(location) => self.classify_location(location),
            None if self.config.infer_location_from_chat => self
                .place_in_text(chat_history)
                .map(|place| self.classify_location(&place))
                .unwrap_or(LocationSpecificity::None),
            None => LocationSpecificity::None,
        }
    }

    /// `district` for comma-separated or sub-area locations, else `city`
    fn classify_location(&self, location: &str) -> LocationSpecificity {
        if location.contains(',')
            || text::any_occurs(&self.district_keywords, &text::tokenize(location))
        {
            LocationSpecificity::District
        } else {
            LocationSpecificity::City
        }
    }

    /// First place name in the text that is not a month, weekday or holiday
    fn place_in_text(&self, text: &str) -> Option<String> {
        PLACE_PATTERN
            .captures_iter(text)
            .filter_map(|caps| caps.name("place"))
            .map(|m| m.as_str())
            .find(|place| !self.place_stopwords.contains(&place.to_lowercase()))
            .map(str::to_string)
    }
}

fn intent_index(intent: LeadIntent) -> usize {
    match intent {
        LeadIntent::Buy => 0,
        LeadIntent::Rent => 1,
        LeadIntent::Book => 2,
    }
}

/// First currency amount mentioned in the text
fn amount_in_text(text: &str) -> Option<f64> {
    AMOUNT_PATTERN.captures_iter(text).find_map(|caps| {
        let (digits, unit) = match caps.name("cur") {
            Some(digits) => (digits, caps.name("cur_unit")),
            None => (caps.name("num")?, caps.name("unit")),
        };
        let value: f64 = digits.as_str().replace(',', "").parse().ok()?;
        let multiplier = match unit.map(|u| u.as_str().to_lowercase()).as_deref() {
            Some("k") | Some("thousand") => 1_000.0,
            Some("m") | Some("mm") | Some("million") => 1_000_000.0,
            _ => 1.0,
        };
        let amount = value * multiplier;
        (amount.is_finite() && amount > 0.0).then_some(amount)
    })
}
