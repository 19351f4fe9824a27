use serde::{Deserialize, Serialize};

/// Fused or per-classifier sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels, in report order.
    pub const ALL: [Sentiment; 3] = [
        Sentiment::Positive,
        Sentiment::Negative,
        Sentiment::Neutral,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Parse a curated label cell. Case and surrounding whitespace are ignored;
    /// anything other than the three labels yields `None`.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One post by one influencer, normalized and annotated with derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Empty when the input had no influencer-like column.
    pub influencer: String,
    pub comment: String,
    pub likes: u64,
    pub shares: u64,
    pub cost: f64,
    pub platform: Option<String>,
    /// `None` when the row carried a trusted `sentiment` label.
    pub sentiment_vader: Option<Sentiment>,
    /// `None` when the row carried a trusted `sentiment` label.
    pub sentiment_textblob: Option<Sentiment>,
    pub sentiment: Sentiment,
    pub engagement: u64,
    /// `None` when the cost could not support a ratio.
    pub roi: Option<f64>,
}

/// Mean metrics for one influencer or platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    pub key: String,
    pub post_count: usize,
    pub mean_engagement: f64,
    /// Records with an undefined ROI are left out of this mean.
    pub roi_count: usize,
    pub mean_roi: Option<f64>,
}

/// Headline pick: the group with the highest mean ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestInfluencer {
    pub influencer: String,
    pub roi: f64,
}

/// Count and share of one sentiment label across a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentShare {
    pub label: Sentiment,
    pub count: usize,
    pub percent: f64,
}
