//! Tokenization and phrase matching

use unicode_segmentation::UnicodeSegmentation;

/// Lowercase Unicode words of `text`
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// A dictionary entry pre-split into tokens
#[derive(Debug, Clone)]
pub(crate) struct Phrase {
    tokens: Vec<String>,
}

impl Phrase {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
        }
    }

    /// True when the phrase's tokens occur contiguously in `haystack`
    pub(crate) fn occurs_in(&self, haystack: &[String]) -> bool {
        !self.tokens.is_empty()
            && haystack
                .windows(self.tokens.len())
                .any(|window| window == self.tokens.as_slice())
    }
}

pub(crate) fn compile(phrases: &[String]) -> Vec<Phrase> {
    phrases.iter().map(|p| Phrase::new(p)).collect()
}

pub(crate) fn any_occurs(phrases: &[Phrase], haystack: &[String]) -> bool {
    phrases.iter().any(|p| p.occurs_in(haystack))
}
