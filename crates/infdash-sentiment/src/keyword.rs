//! Naive whole-word keyword classifier for line-oriented text.

use infdash_core::Sentiment;
use regex::Regex;

use crate::error::SentimentError;

pub const POSITIVE_KEYWORDS: &[&str] = &["happy", "good", "excellent", "positive", "love"];
pub const NEGATIVE_KEYWORDS: &[&str] = &["sad", "bad", "terrible", "negative"];

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    positive: Regex,
    negative: Regex,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    /// Classifier over [`POSITIVE_KEYWORDS`] and [`NEGATIVE_KEYWORDS`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            positive: Regex::new(&word_pattern(POSITIVE_KEYWORDS)).expect("valid regex"),
            negative: Regex::new(&word_pattern(NEGATIVE_KEYWORDS)).expect("valid regex"),
        }
    }

    /// Classifier over caller-supplied keyword lists.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Pattern`] if a combined pattern exceeds the
    /// regex size limits.
    pub fn with_keywords(positive: &[&str], negative: &[&str]) -> Result<Self, SentimentError> {
        Ok(Self {
            positive: Regex::new(&word_pattern(positive))?,
            negative: Regex::new(&word_pattern(negative))?,
        })
    }

    /// Positive-only hits are positive, negative-only hits are negative,
    /// anything else is neutral.
    #[must_use]
    pub fn classify(&self, text: &str) -> Sentiment {
        let pos = self.positive.is_match(text);
        let neg = self.negative.is_match(text);
        match (pos, neg) {
            (true, false) => Sentiment::Positive,
            (false, true) => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

/// Case-insensitive alternation anchored on word boundaries. An empty list
/// yields a pattern that never matches.
fn word_pattern(words: &[&str]) -> String {
    if words.is_empty() {
        return r"[^\s\S]".to_string();
    }
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?i)\b(?:{alternation})\b")
}
