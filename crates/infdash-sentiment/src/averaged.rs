//! Averaged lexical polarity scorer in the style of TextBlob.
//!
//! Each polar word contributes its lexicon polarity, scaled by a preceding
//! intensifier and halved-and-flipped by a preceding negation. The text score
//! is the mean over polar words.

use std::collections::HashMap;

use crate::error::SentimentError;
use crate::lexicon::{is_negation, INTENSIFIERS, POLARITY};
use crate::scorer::{tokenize, PolarityScorer};

const NEGATION_SCALAR: f64 = -0.5;

#[derive(Debug, Clone)]
pub struct AveragedScorer {
    polarity: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for AveragedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AveragedScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            polarity: POLARITY.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Mean polarity in `[-1.0, 1.0]`; `0.0` when no polar word is found.
    #[must_use]
    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut scores = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.polarity.get(token.lower.as_str()) else {
                continue;
            };
            let prev = i.checked_sub(1).map(|j| tokens[j].lower.as_str());
            let prev2 = i.checked_sub(2).map(|j| tokens[j].lower.as_str());

            let mut p = base;
            let intensified = prev.and_then(|w| self.intensifiers.get(w)).copied();
            if let Some(multiplier) = intensified {
                p = (p * multiplier).clamp(-1.0, 1.0);
            }

            // "not good", and "not very good" with the intensifier in between.
            let negated = match (prev, intensified) {
                (Some(w), _) if is_negation(w) => true,
                (Some(_), Some(_)) => prev2.is_some_and(is_negation),
                _ => false,
            };
            if negated {
                p *= NEGATION_SCALAR;
            }

            scores.push(p);
        }

        if scores.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for AveragedScorer {
    fn name(&self) -> &'static str {
        "textblob"
    }

    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        Ok(self.polarity(text))
    }
}
