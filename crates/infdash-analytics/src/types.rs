use infdash_core::Sentiment;
use serde::Serialize;

/// Which defaults a single row needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RowFallbacks {
    pub likes: bool,
    pub shares: bool,
    pub cost: bool,
    /// The row's `sentiment` cell was not a recognized label and was re-scored.
    pub sentiment_label: bool,
    pub influencer: bool,
    pub classifier: bool,
    pub roi: bool,
}

impl RowFallbacks {
    #[must_use]
    pub fn any(&self) -> bool {
        self.likes
            || self.shares
            || self.cost
            || self.sentiment_label
            || self.influencer
            || self.classifier
            || self.roi
    }
}

/// One input row after schema normalization, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub influencer: String,
    pub comment: String,
    pub likes: u64,
    pub shares: u64,
    pub cost: f64,
    pub platform: Option<String>,
    /// A curated label carried by the input; fusion is skipped when set.
    pub trusted_sentiment: Option<Sentiment>,
    pub fallbacks: RowFallbacks,
}

/// Batch-level tally of rows that used fallback values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FallbackReport {
    /// Rows that used at least one fallback.
    pub rows: usize,
    pub likes: usize,
    pub shares: usize,
    pub cost: usize,
    pub sentiment_label: usize,
    pub influencer: usize,
    pub classifier: usize,
    pub roi: usize,
}

impl FallbackReport {
    pub fn record(&mut self, row: &RowFallbacks) {
        if !row.any() {
            return;
        }
        self.rows += 1;
        self.likes += usize::from(row.likes);
        self.shares += usize::from(row.shares);
        self.cost += usize::from(row.cost);
        self.sentiment_label += usize::from(row.sentiment_label);
        self.influencer += usize::from(row.influencer);
        self.classifier += usize::from(row.classifier);
        self.roi += usize::from(row.roi);
    }

    #[must_use]
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RowFallbacks>) -> Self {
        let mut report = Self::default();
        for row in rows {
            report.record(row);
        }
        report
    }
}
