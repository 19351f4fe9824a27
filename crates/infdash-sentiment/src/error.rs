use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("{scorer} scorer failed: {reason}")]
    Scorer { scorer: String, reason: String },

    #[error("{scorer} returned {score}, outside [-1, 1]")]
    OutOfRange { scorer: String, score: f64 },

    #[error("invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}
