//! Score → tag banding

use lead_triage_config::TagThresholds;
use lead_triage_core::LeadTag;

/// Maps a score to hot/warm/cold. Band lower bounds are inclusive.
#[derive(Debug, Clone)]
pub struct TagClassifier {
    thresholds: TagThresholds,
}

impl TagClassifier {
    pub fn new(thresholds: TagThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, score: f64) -> LeadTag {
        if score >= self.thresholds.hot {
            LeadTag::Hot
        } else if score >= self.thresholds.warm {
            LeadTag::Warm
        } else {
            LeadTag::Cold
        }
    }
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self::new(TagThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let classifier = TagClassifier::default();
        assert_eq!(classifier.classify(0.0), LeadTag::Cold);
        assert_eq!(classifier.classify(0.399), LeadTag::Cold);
        assert_eq!(classifier.classify(0.4), LeadTag::Warm);
        assert_eq!(classifier.classify(0.699), LeadTag::Warm);
        assert_eq!(classifier.classify(0.7), LeadTag::Hot);
        assert_eq!(classifier.classify(1.0), LeadTag::Hot);
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = TagClassifier::new(TagThresholds { hot: 0.9, warm: 0.2 });
        assert_eq!(classifier.classify(0.8), LeadTag::Warm);
        assert_eq!(classifier.classify(0.1), LeadTag::Cold);
    }
}
