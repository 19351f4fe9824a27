//! Rule/lexicon compound scorer in the style of VADER.
//!
//! Word valences are summed with a handful of adjustments (degree boosters,
//! negation, all-caps emphasis, a contrastive "but", exclamation marks) and
//! the sum is squashed into `[-1.0, 1.0]`.

use std::collections::HashMap;

use crate::error::SentimentError;
use crate::lexicon::{is_negation, BOOSTERS, VALENCE};
use crate::scorer::{tokenize, PolarityScorer, Token};

/// Normalization constant for `sum / sqrt(sum^2 + ALPHA)`.
const ALPHA: f64 = 15.0;
/// Added to the magnitude of a shouted word when the text mixes case.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier for a sentiment word preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Booster influence decays with distance: 1, 2 and 3 words back.
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;

/// Compound scorer. Build once with [`CompoundScorer::new`] and share.
#[derive(Debug, Clone)]
pub struct CompoundScorer {
    valence: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
}

impl Default for CompoundScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundScorer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            valence: VALENCE.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    /// Compound score in `[-1.0, 1.0]`; `0.0` for text with no known words.
    #[must_use]
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mixed_case = has_mixed_case(&tokens);
        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.word_valence(&tokens, i, token, mixed_case))
            .collect();

        if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= BEFORE_BUT;
                } else if i > pivot {
                    *v *= AFTER_BUT;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS);
            #[allow(clippy::cast_precision_loss)]
            let emphasis = bangs as f64 * EXCLAMATION_INCREMENT;
            sum += emphasis.copysign(sum);
        }

        normalize(sum)
    }

    fn word_valence(
        &self,
        tokens: &[Token<'_>],
        i: usize,
        token: &Token<'_>,
        mixed_case: bool,
    ) -> f64 {
        if self.boosters.contains_key(token.lower.as_str()) {
            return 0.0;
        }
        let Some(&base) = self.valence.get(token.lower.as_str()) else {
            return 0.0;
        };

        let mut v = base;
        if mixed_case && token.is_shouted() {
            v += CAPS_INCREMENT.copysign(v);
        }

        for (distance, decay) in BOOSTER_DECAY.iter().enumerate() {
            let Some(prev) = i.checked_sub(distance + 1).map(|j| &tokens[j]) else {
                break;
            };
            if let Some(&boost) = self.boosters.get(prev.lower.as_str()) {
                let mut scalar = if v < 0.0 { -boost } else { boost };
                if mixed_case && prev.is_shouted() {
                    scalar += CAPS_INCREMENT.copysign(v);
                }
                v += scalar * decay;
            }
            if is_negation(&prev.lower) {
                v *= NEGATION_SCALAR;
            }
        }

        v
    }
}

impl PolarityScorer for CompoundScorer {
    fn name(&self) -> &'static str {
        "vader"
    }

    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        Ok(self.compound(text))
    }
}

/// `true` when some, but not all, words are shouted.
fn has_mixed_case(tokens: &[Token<'_>]) -> bool {
    let shouted = tokens.iter().filter(|t| t.is_shouted()).count();
    shouted > 0 && shouted < tokens.len()
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
