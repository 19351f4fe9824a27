//! Two-classifier sentiment fusion.

use infdash_core::Sentiment;

use crate::averaged::AveragedScorer;
use crate::compound::CompoundScorer;
use crate::error::SentimentError;
use crate::scorer::{compound_label, polarity_label, PolarityScorer};

/// Per-text output of [`FusionEngine::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusedSentiment {
    /// Label from the compound (first) classifier.
    pub vader: Sentiment,
    /// Label from the averaged-polarity (second) classifier.
    pub textblob: Sentiment,
    pub sentiment: Sentiment,
    /// Number of classifiers that failed and were labeled neutral.
    pub failures: u8,
}

/// Mode of `labels`.
///
/// Ties go to the label seen first, so with two disagreeing classifiers the
/// first classifier wins. An empty slice is `Neutral`.
#[must_use]
pub fn fuse(labels: &[Sentiment]) -> Sentiment {
    let mut tally: Vec<(Sentiment, usize)> = Vec::with_capacity(Sentiment::ALL.len());
    for &label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(Sentiment, usize)> = None;
    for (label, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map_or(Sentiment::Neutral, |(label, _)| label)
}

/// Runs the compound and averaged scorers over a text and fuses their labels.
pub struct FusionEngine {
    compound: Box<dyn PolarityScorer>,
    averaged: Box<dyn PolarityScorer>,
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(
            Box::new(CompoundScorer::new()),
            Box::new(AveragedScorer::new()),
        )
    }
}

impl std::fmt::Debug for FusionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionEngine")
            .field("compound", &self.compound.name())
            .field("averaged", &self.averaged.name())
            .finish()
    }
}

impl FusionEngine {
    /// `compound` fills the first slot (inclusive `±0.05` thresholds and
    /// tie-break priority); `averaged` fills the second (exclusive `±0.1`).
    #[must_use]
    pub fn new(compound: Box<dyn PolarityScorer>, averaged: Box<dyn PolarityScorer>) -> Self {
        Self { compound, averaged }
    }

    /// Classify one text. Never fails: a scorer error or an out-of-range
    /// score labels that classifier `Neutral` and is logged.
    #[must_use]
    pub fn classify(&self, text: &str) -> FusedSentiment {
        let mut failures = 0_u8;

        let vader = match checked_score(self.compound.as_ref(), text) {
            Ok(score) => compound_label(score),
            Err(e) => {
                tracing::warn!(error = %e, "compound scorer failed; labeling neutral");
                failures += 1;
                Sentiment::Neutral
            }
        };

        let textblob = match checked_score(self.averaged.as_ref(), text) {
            Ok(score) => polarity_label(score),
            Err(e) => {
                tracing::warn!(error = %e, "polarity scorer failed; labeling neutral");
                failures += 1;
                Sentiment::Neutral
            }
        };

        FusedSentiment {
            vader,
            textblob,
            sentiment: fuse(&[vader, textblob]),
            failures,
        }
    }
}

fn checked_score(scorer: &dyn PolarityScorer, text: &str) -> Result<f64, SentimentError> {
    let score = scorer.score(text)?;
    if score.is_finite() && (-1.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(SentimentError::OutOfRange {
            scorer: scorer.name().to_string(),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the same score for every input.
    struct Fixed(f64);

    impl PolarityScorer for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn score(&self, _text: &str) -> Result<f64, SentimentError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl PolarityScorer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn score(&self, _text: &str) -> Result<f64, SentimentError> {
            Err(SentimentError::Scorer {
                scorer: "failing".to_string(),
                reason: "boom".to_string(),
            })
        }
    }

    fn engine(a: impl PolarityScorer + 'static, b: impl PolarityScorer + 'static) -> FusionEngine {
        FusionEngine::new(Box::new(a), Box::new(b))
    }

    #[test]
    fn fuse_agreeing_labels() {
        for label in Sentiment::ALL {
            assert_eq!(fuse(&[label, label]), label);
        }
    }

    #[test]
    fn fuse_disagreement_prefers_first() {
        assert_eq!(
            fuse(&[Sentiment::Positive, Sentiment::Negative]),
            Sentiment::Positive
        );
        assert_eq!(
            fuse(&[Sentiment::Negative, Sentiment::Positive]),
            Sentiment::Negative
        );
        assert_eq!(
            fuse(&[Sentiment::Neutral, Sentiment::Positive]),
            Sentiment::Neutral
        );
    }

    #[test]
    fn fuse_majority_beats_order() {
        assert_eq!(
            fuse(&[Sentiment::Neutral, Sentiment::Positive, Sentiment::Positive]),
            Sentiment::Positive
        );
    }

    #[test]
    fn fuse_empty_is_neutral() {
        assert_eq!(fuse(&[]), Sentiment::Neutral);
    }

    #[test]
    fn positive_vs_negative_resolves_to_compound_label_every_time() {
        let engine = engine(Fixed(0.6), Fixed(-0.6));
        for _ in 0..50 {
            let fused = engine.classify("anything");
            assert_eq!(fused.vader, Sentiment::Positive);
            assert_eq!(fused.textblob, Sentiment::Negative);
            assert_eq!(fused.sentiment, Sentiment::Positive);
        }
    }

    #[test]
    fn slot_thresholds_differ() {
        // 0.07 clears the compound threshold but not the polarity one.
        let fused = engine(Fixed(0.07), Fixed(0.07)).classify("x");
        assert_eq!(fused.vader, Sentiment::Positive);
        assert_eq!(fused.textblob, Sentiment::Neutral);
        assert_eq!(fused.sentiment, Sentiment::Positive);
    }

    #[test]
    fn failing_scorer_degrades_to_neutral() {
        let fused = engine(Failing, Fixed(-0.8)).classify("x");
        assert_eq!(fused.vader, Sentiment::Neutral);
        assert_eq!(fused.textblob, Sentiment::Negative);
        assert_eq!(fused.sentiment, Sentiment::Neutral);
        assert_eq!(fused.failures, 1);
    }

    #[test]
    fn out_of_range_and_nan_scores_degrade_to_neutral() {
        let fused = engine(Fixed(f64::NAN), Fixed(3.0)).classify("x");
        assert_eq!(fused.vader, Sentiment::Neutral);
        assert_eq!(fused.textblob, Sentiment::Neutral);
        assert_eq!(fused.failures, 2);
    }

    #[test]
    fn default_engine_empty_text_is_neutral() {
        let fused = FusionEngine::default().classify("");
        assert_eq!(fused.sentiment, Sentiment::Neutral);
        assert_eq!(fused.failures, 0);
    }

    #[test]
    fn default_engine_agreeing_texts() {
        let engine = FusionEngine::default();
        assert_eq!(engine.classify("I love this, it is great").sentiment, Sentiment::Positive);
        assert_eq!(engine.classify("terrible and awful").sentiment, Sentiment::Negative);
    }

    #[test]
    fn default_engine_disagreement_uses_compound_label() {
        // "wow" is only in the compound lexicon, "expensive" only in the polarity one.
        let fused = FusionEngine::default().classify("wow, expensive");
        assert_eq!(fused.vader, Sentiment::Positive);
        assert_eq!(fused.textblob, Sentiment::Negative);
        assert_eq!(fused.sentiment, Sentiment::Positive);
    }
}
