//! Lead Scoring Configuration
//!
//! Config-driven tables for the triage engine: signal weights, budget
//! tiers, tag thresholds, keyword dictionaries and reason threshold.
//! Operators retune these in `scoring.yaml` without code changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use lead_triage_core::{BudgetTier, LeadIntent, LocationSpecificity, UrgencyLevel};

use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::ConfigError;

/// Scoring configuration loaded from scoring.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Signal weights, must sum to 1
    #[serde(default)]
    pub weights: SignalWeights,
    /// Ordered budget bands; the last one is unbounded
    #[serde(default = "default_budget_tiers")]
    pub budget_tiers: Vec<BudgetBand>,
    /// Tag band lower bounds
    #[serde(default)]
    pub tag_thresholds: TagThresholds,
    /// Normalized value of each signal level
    #[serde(default)]
    pub levels: LevelScores,
    /// Urgency keyword dictionaries
    #[serde(default)]
    pub urgency: UrgencyKeywords,
    /// Buy/rent/book intent phrases
    #[serde(default = "default_intent_phrases")]
    pub intent_phrases: Vec<IntentPhrase>,
    /// Phrases that show a budget was discussed without naming an amount
    #[serde(default = "default_budget_keywords")]
    pub budget_keywords: Vec<String>,
    /// Words that mark a location as a sub-area rather than a city
    #[serde(default = "default_district_keywords")]
    pub district_keywords: Vec<String>,
    /// Infer a location from the conversation when preferences lack one
    #[serde(default = "default_true")]
    pub infer_location_from_chat: bool,
    /// Capitalized words after "in"/"at" that name a time, not a place
    #[serde(default = "default_place_stopwords")]
    pub place_stopwords: Vec<String>,
    /// Contributions at or below this are left out of the reasons
    #[serde(default = "default_min_reason_contribution")]
    pub min_reason_contribution: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            budget_tiers: default_budget_tiers(),
            tag_thresholds: TagThresholds::default(),
            levels: LevelScores::default(),
            urgency: UrgencyKeywords::default(),
            intent_phrases: default_intent_phrases(),
            budget_keywords: default_budget_keywords(),
            district_keywords: default_district_keywords(),
            infer_location_from_chat: true,
            place_stopwords: default_place_stopwords(),
            min_reason_contribution: default_min_reason_contribution(),
        }
    }
}

impl ScoringConfig {
    /// Load and validate from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileNotFound {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            tiers = config.budget_tiers.len(),
            intent_phrases = config.intent_phrases.len(),
            "Loaded scoring configuration"
        );
        Ok(config)
    }

    /// Tier for a budget amount.
    ///
    /// A band matches when its ceiling is strictly greater than the
    /// amount, so each band is inclusive on its lower bound.
    pub fn budget_tier(&self, amount: f64) -> BudgetTier {
        self.budget_tiers
            .iter()
            .find(|band| band.ceiling.map_or(true, |ceiling| amount < ceiling))
            .map(|band| band.tier)
            .unwrap_or(BudgetTier::Unknown)
    }

    /// Fail-fast validation of every table
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.validate_budget_tiers()?;
        self.tag_thresholds.validate()?;
        self.levels.validate()?;
        self.validate_intent_phrases()?;

        if !(0.0..=1.0).contains(&self.min_reason_contribution) {
            return Err(ConfigError::invalid(
                "scoring.min_reason_contribution",
                format!("Must be between 0.0 and 1.0, got {}", self.min_reason_contribution),
            ));
        }

        Ok(())
    }

    fn validate_budget_tiers(&self) -> Result<(), ConfigError> {
        const FIELD: &str = "scoring.budget_tiers";

        let Some((last, bounded)) = self.budget_tiers.split_last() else {
            return Err(ConfigError::invalid(FIELD, "At least one budget band is required"));
        };

        if last.ceiling.is_some() {
            return Err(ConfigError::invalid(
                FIELD,
                "The last budget band must omit its ceiling",
            ));
        }

        let mut previous_ceiling = 0.0_f64;
        for (i, band) in bounded.iter().enumerate() {
            let Some(ceiling) = band.ceiling else {
                return Err(ConfigError::invalid(
                    FIELD,
                    format!("Band {} has no ceiling but is not the last band", i),
                ));
            };
            if !ceiling.is_finite() || ceiling <= previous_ceiling {
                return Err(ConfigError::invalid(
                    FIELD,
                    format!(
                        "Ceilings must be finite, positive and strictly increasing (band {}: {})",
                        i, ceiling
                    ),
                ));
            }
            previous_ceiling = ceiling;
        }

        let mut previous_tier = BudgetTier::Unknown;
        for (i, band) in self.budget_tiers.iter().enumerate() {
            if band.tier == BudgetTier::Unknown {
                return Err(ConfigError::invalid(
                    FIELD,
                    format!("Band {} maps to 'unknown', which is reserved", i),
                ));
            }
            if band.tier < previous_tier {
                return Err(ConfigError::invalid(
                    FIELD,
                    format!(
                        "Tiers must not decrease along the list (band {} is {})",
                        i,
                        band.tier.as_str()
                    ),
                ));
            }
            previous_tier = band.tier;
        }

        Ok(())
    }

    fn validate_intent_phrases(&self) -> Result<(), ConfigError> {
        for (i, phrase) in self.intent_phrases.iter().enumerate() {
            if phrase.phrase.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "scoring.intent_phrases",
                    format!("Phrase {} is empty", i),
                ));
            }
            if !(0.0..=1.0).contains(&phrase.strength) {
                return Err(ConfigError::invalid(
                    "scoring.intent_phrases",
                    format!(
                        "Strength of '{}' must be between 0.0 and 1.0, got {}",
                        phrase.phrase, phrase.strength
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Weights for the four scoring signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub urgency: f64,
    pub intent: f64,
    pub budget: f64,
    pub location: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            urgency: 0.35,
            intent: 0.30,
            budget: 0.20,
            location: 0.15,
        }
    }
}

impl SignalWeights {
    pub fn sum(&self) -> f64 {
        self.urgency + self.intent + self.budget + self.location
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [
            ("urgency", self.urgency),
            ("intent", self.intent),
            ("budget", self.budget),
            ("location", self.location),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::invalid(
                    format!("scoring.weights.{}", name),
                    format!("Must be a non-negative number, got {}", weight),
                ));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::invalid(
                "scoring.weights",
                format!("Weights must sum to 1.0, got {}", sum),
            ));
        }
        Ok(())
    }
}

/// One budget band: amounts below `ceiling` map to `tier`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBand {
    /// Exclusive upper bound; `None` for the final, unbounded band
    #[serde(default)]
    pub ceiling: Option<f64>,
    pub tier: BudgetTier,
}

fn default_budget_tiers() -> Vec<BudgetBand> {
    vec![
        BudgetBand {
            ceiling: Some(150_000.0),
            tier: BudgetTier::Low,
        },
        BudgetBand {
            ceiling: Some(500_000.0),
            tier: BudgetTier::Mid,
        },
        BudgetBand {
            ceiling: None,
            tier: BudgetTier::High,
        },
    ]
}

/// Tag band lower bounds (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagThresholds {
    pub hot: f64,
    pub warm: f64,
}

impl Default for TagThresholds {
    fn default() -> Self {
        Self { hot: 0.7, warm: 0.4 }
    }
}

impl TagThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.warm > 0.0 && self.warm < self.hot && self.hot <= 1.0;
        if !ordered {
            return Err(ConfigError::invalid(
                "scoring.tag_thresholds",
                format!(
                    "Expected 0 < warm < hot <= 1, got warm={} hot={}",
                    self.warm, self.hot
                ),
            ));
        }
        Ok(())
    }
}

/// Normalized [0, 1] value of each signal level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelScores {
    pub urgency: UrgencyScores,
    pub budget: BudgetScores,
    pub location: LocationScores,
}

impl LevelScores {
    pub fn urgency_score(&self, level: UrgencyLevel) -> f64 {
        match level {
            UrgencyLevel::None => self.urgency.none,
            UrgencyLevel::Low => self.urgency.low,
            UrgencyLevel::High => self.urgency.high,
        }
    }

    /// Budget value; `mentioned` covers a budget with no nameable tier
    pub fn budget_score(&self, tier: BudgetTier, has_budget: bool) -> f64 {
        match tier {
            BudgetTier::Unknown if has_budget => self.budget.mentioned,
            BudgetTier::Unknown => self.budget.unknown,
            BudgetTier::Low => self.budget.low,
            BudgetTier::Mid => self.budget.mid,
            BudgetTier::High => self.budget.high,
        }
    }

    pub fn location_score(&self, specificity: LocationSpecificity) -> f64 {
        match specificity {
            LocationSpecificity::None => self.location.none,
            LocationSpecificity::City => self.location.city,
            LocationSpecificity::District => self.location.district,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_monotone(
            "scoring.levels.urgency",
            &[
                ("none", self.urgency.none),
                ("low", self.urgency.low),
                ("high", self.urgency.high),
            ],
        )?;
        check_monotone(
            "scoring.levels.budget",
            &[
                ("unknown", self.budget.unknown),
                ("mentioned", self.budget.mentioned),
                ("low", self.budget.low),
                ("mid", self.budget.mid),
                ("high", self.budget.high),
            ],
        )?;
        check_monotone(
            "scoring.levels.location",
            &[
                ("none", self.location.none),
                ("city", self.location.city),
                ("district", self.location.district),
            ],
        )
    }
}

/// Every value in [0, 1], non-decreasing weakest to strongest
fn check_monotone(field: &str, values: &[(&str, f64)]) -> Result<(), ConfigError> {
    let mut previous = 0.0_f64;
    for &(name, value) in values {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::invalid(
                format!("{}.{}", field, name),
                format!("Must be between 0.0 and 1.0, got {}", value),
            ));
        }
        if value < previous {
            return Err(ConfigError::invalid(
                format!("{}.{}", field, name),
                format!("Must not be lower than the weaker level ({} < {})", value, previous),
            ));
        }
        previous = value;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyScores {
    pub none: f64,
    pub low: f64,
    pub high: f64,
}

impl Default for UrgencyScores {
    fn default() -> Self {
        Self {
            none: 0.0,
            low: 0.5,
            high: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetScores {
    pub unknown: f64,
    pub mentioned: f64,
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Default for BudgetScores {
    fn default() -> Self {
        Self {
            unknown: 0.0,
            mentioned: 0.3,
            low: 0.4,
            mid: 0.7,
            high: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationScores {
    pub none: f64,
    pub city: f64,
    pub district: f64,
}

impl Default for LocationScores {
    fn default() -> Self {
        Self {
            none: 0.0,
            city: 0.5,
            district: 1.0,
        }
    }
}

/// Urgency keyword dictionaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyKeywords {
    /// Phrases that mean "act now"
    pub high_keywords: Vec<String>,
    /// Phrases that mean "soon, but not now"
    pub low_keywords: Vec<String>,
    /// Exact `preferences.urgency` values and the level they stand for
    pub preference_aliases: HashMap<String, UrgencyLevel>,
}

impl Default for UrgencyKeywords {
    fn default() -> Self {
        let high_keywords = [
            "asap",
            "as soon as possible",
            "urgent",
            "urgently",
            "immediately",
            "right away",
            "this week",
            "today",
            "emergency",
        ];
        let low_keywords = [
            "soon",
            "quick",
            "quickly",
            "this month",
            "next month",
            "few weeks",
            "shortly",
        ];
        let aliases = [
            ("high", UrgencyLevel::High),
            ("immediate", UrgencyLevel::High),
            ("urgent", UrgencyLevel::High),
            ("asap", UrgencyLevel::High),
            ("medium", UrgencyLevel::Low),
            ("moderate", UrgencyLevel::Low),
            ("low", UrgencyLevel::Low),
            ("soon", UrgencyLevel::Low),
            ("3_months", UrgencyLevel::Low),
            ("6_months", UrgencyLevel::Low),
            ("exploring", UrgencyLevel::None),
            ("none", UrgencyLevel::None),
        ];

        Self {
            high_keywords: high_keywords.iter().map(|s| s.to_string()).collect(),
            low_keywords: low_keywords.iter().map(|s| s.to_string()).collect(),
            preference_aliases: aliases
                .iter()
                .map(|(alias, level)| (alias.to_string(), *level))
                .collect(),
        }
    }
}

/// A phrase that signals intent, with its match strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPhrase {
    pub phrase: String,
    /// Intent the phrase points at; `None` for generic interest
    #[serde(default)]
    pub intent: Option<LeadIntent>,
    pub strength: f64,
}

impl IntentPhrase {
    fn new(phrase: &str, intent: Option<LeadIntent>, strength: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            intent,
            strength,
        }
    }
}

fn default_intent_phrases() -> Vec<IntentPhrase> {
    use LeadIntent::{Book, Buy, Rent};

    vec![
        // Buy
        IntentPhrase::new("ready to buy", Some(Buy), 0.6),
        IntentPhrase::new("want to buy", Some(Buy), 0.5),
        IntentPhrase::new("looking to buy", Some(Buy), 0.5),
        IntentPhrase::new("make an offer", Some(Buy), 0.6),
        IntentPhrase::new("cash buyer", Some(Buy), 0.6),
        IntentPhrase::new("mortgage approved", Some(Buy), 0.6),
        IntentPhrase::new("pre approved", Some(Buy), 0.5),
        IntentPhrase::new("buy", Some(Buy), 0.3),
        IntentPhrase::new("purchase", Some(Buy), 0.3),
        IntentPhrase::new("mortgage", Some(Buy), 0.2),
        // Rent
        IntentPhrase::new("looking to rent", Some(Rent), 0.5),
        IntentPhrase::new("want to rent", Some(Rent), 0.5),
        IntentPhrase::new("sign the lease", Some(Rent), 0.6),
        IntentPhrase::new("move in", Some(Rent), 0.4),
        IntentPhrase::new("rent", Some(Rent), 0.3),
        IntentPhrase::new("lease", Some(Rent), 0.3),
        IntentPhrase::new("tenancy", Some(Rent), 0.3),
        // Book
        IntentPhrase::new("book a viewing", Some(Book), 0.6),
        IntentPhrase::new("schedule a viewing", Some(Book), 0.6),
        IntentPhrase::new("second viewing", Some(Book), 0.5),
        IntentPhrase::new("when can i see", Some(Book), 0.5),
        IntentPhrase::new("book", Some(Book), 0.3),
        IntentPhrase::new("viewing", Some(Book), 0.3),
        IntentPhrase::new("visit", Some(Book), 0.2),
        IntentPhrase::new("schedule", Some(Book), 0.2),
        // Generic interest
        IntentPhrase::new("need to move", None, 0.5),
        IntentPhrase::new("price negotiable", None, 0.2),
        IntentPhrase::new("payment plan", None, 0.2),
        IntentPhrase::new("interested", None, 0.15),
    ]
}

fn default_budget_keywords() -> Vec<String> {
    ["budget", "afford", "price range", "spend"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_district_keywords() -> Vec<String> {
    [
        "district",
        "downtown",
        "neighborhood",
        "neighbourhood",
        "suburb",
        "quarter",
        "borough",
        "sector",
        "block",
        "street",
        "avenue",
        "road",
        "heights",
        "marina",
        "village",
        "old town",
        "city center",
        "city centre",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_place_stopwords() -> Vec<String> {
    [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
        "christmas",
        "easter",
        "new year",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_true() -> bool {
    true
}

fn default_min_reason_contribution() -> f64 {
    0.05
}
