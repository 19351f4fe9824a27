use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no text column found: expected one of {expected} (columns present: {present})")]
    MissingTextColumn { expected: String, present: String },

    #[error("no influencer column found: expected one of {expected} (columns present: {present})")]
    MissingInfluencerColumn { expected: String, present: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum MetricError {
    #[error("cannot compute ROI with cost {cost}: cost must be positive")]
    NonPositiveCost { cost: f64 },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read CSV {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Table(#[from] TableError),
}
