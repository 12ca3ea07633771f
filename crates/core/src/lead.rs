//! Lead scoring wire contract
//!
//! These types mirror the JSON bodies exchanged on `POST /api/leads/score`.

use serde::{Deserialize, Serialize};

/// Structured hints captured by the chat widget or a lead form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadPreferences {
    /// Stated budget in the agency's currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// Free-text location, e.g. "Downtown, City Center"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-text urgency label, e.g. "high" or "3_months"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
}

impl LeadPreferences {
    /// True when no preference carries any content
    pub fn is_empty(&self) -> bool {
        self.budget.is_none() && is_blank(&self.location) && is_blank(&self.urgency)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Lead scoring request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadScoreRequest {
    /// Concatenated conversation text, may be empty
    #[serde(default)]
    pub chat_history: String,
    #[serde(default)]
    pub preferences: LeadPreferences,
}

impl LeadScoreRequest {
    pub fn new(chat_history: impl Into<String>, preferences: LeadPreferences) -> Self {
        Self {
            chat_history: chat_history.into(),
            preferences,
        }
    }

    /// A request with neither conversation text nor preferences.
    ///
    /// Callers reject these before scoring.
    pub fn is_empty(&self) -> bool {
        self.chat_history.trim().is_empty() && self.preferences.is_empty()
    }
}

/// Qualitative triage bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadTag {
    Hot,
    Warm,
    Cold,
}

impl LeadTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
        }
    }
}

impl std::fmt::Display for LeadTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the lead is trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadIntent {
    Buy,
    Rent,
    Book,
}

impl LeadIntent {
    /// All intents in tie-break order
    pub const ALL: [LeadIntent; 3] = [LeadIntent::Buy, LeadIntent::Rent, LeadIntent::Book];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Rent => "rent",
            Self::Book => "book",
        }
    }
}

/// Lead scoring response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScoreResponse {
    /// Priority score in [0, 1]
    pub score: f64,
    pub tag: LeadTag,
    /// Reasons ordered by descending contribution
    pub reasons: Vec<String>,
    /// Whether the lead should be routed to a human agent
    #[serde(default)]
    pub escalate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_missing_fields() {
        let request: LeadScoreRequest = serde_json::from_str("{}").unwrap();
        assert!(request.chat_history.is_empty());
        assert_eq!(request.preferences, LeadPreferences::default());
        assert!(request.is_empty());
    }

    #[test]
    fn test_request_with_only_preferences_is_not_empty() {
        let request: LeadScoreRequest =
            serde_json::from_str(r#"{"chat_history": "  ", "preferences": {"budget": 1000000}}"#)
                .unwrap();
        assert!(!request.is_empty());
        assert_eq!(request.preferences.budget, Some(1_000_000.0));
    }

    #[test]
    fn test_blank_preference_strings_count_as_empty() {
        let prefs = LeadPreferences {
            budget: None,
            location: Some("   ".to_string()),
            urgency: Some(String::new()),
        };
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_response_wire_shape() {
        let response = LeadScoreResponse {
            score: 0.75,
            tag: LeadTag::Hot,
            reasons: vec!["High urgency detected in conversation".to_string()],
            escalate: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tag"], "hot");
        assert_eq!(json["score"], 0.75);
        assert_eq!(json["reasons"][0], "High urgency detected in conversation");
        assert_eq!(json["escalate"], true);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(LeadTag::Warm.to_string(), "warm");
        assert_eq!(LeadTag::Cold.as_str(), "cold");
    }
}
