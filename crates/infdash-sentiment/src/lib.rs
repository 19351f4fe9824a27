//! Sentiment scoring for influencer posts.
//!
//! Two independent lexicon scorers (a VADER-style compound scorer and a
//! TextBlob-style averaged polarity scorer) each label a text, and the
//! [`FusionEngine`] reconciles the two labels into one. A naive keyword
//! classifier is provided for quick line-by-line checks.

pub mod averaged;
pub mod compound;
pub mod error;
pub mod fusion;
pub mod keyword;
pub mod scorer;

mod lexicon;

pub use averaged::AveragedScorer;
pub use compound::CompoundScorer;
pub use error::SentimentError;
pub use fusion::{fuse, FusedSentiment, FusionEngine};
pub use keyword::KeywordClassifier;
pub use scorer::{compound_label, polarity_label, PolarityScorer};
