//! Scorer seam and the score-to-label thresholds for each classifier slot.

use infdash_core::Sentiment;

use crate::error::SentimentError;

/// Compound scores at or above this are positive.
pub const COMPOUND_POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative.
pub const COMPOUND_NEGATIVE_THRESHOLD: f64 = -0.05;
/// Polarity scores strictly above this are positive.
pub const POLARITY_POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity scores strictly below this are negative.
pub const POLARITY_NEGATIVE_THRESHOLD: f64 = -0.1;

/// Something that maps text to a polarity in `[-1.0, 1.0]`.
///
/// Implementations are built once per run and shared read-only across
/// worker threads.
pub trait PolarityScorer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Score `text`. Empty text should score `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the text cannot be scored.
    fn score(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Label for the compound (first) classifier slot.
#[must_use]
pub fn compound_label(score: f64) -> Sentiment {
    if score >= COMPOUND_POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score <= COMPOUND_NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Label for the averaged-polarity (second) classifier slot.
#[must_use]
pub fn polarity_label(score: f64) -> Sentiment {
    if score > POLARITY_POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < POLARITY_NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// A whitespace-delimited word with surrounding punctuation removed.
#[derive(Debug)]
pub(crate) struct Token<'a> {
    pub raw: &'a str,
    pub lower: String,
}

impl Token<'_> {
    /// All-caps words of two or more letters, e.g. `GREAT`.
    pub fn is_shouted(&self) -> bool {
        let mut letters = 0_usize;
        for c in self.raw.chars().filter(|c| c.is_alphabetic()) {
            if !c.is_uppercase() {
                return false;
            }
            letters += 1;
        }
        letters > 1
    }
}

pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|raw| Token {
            raw,
            lower: raw.to_lowercase(),
        })
        .collect()
}
