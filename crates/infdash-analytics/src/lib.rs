//! Influencer post analytics: CSV table handling, schema normalization,
//! engagement/ROI metrics and group aggregation.

pub mod aggregate;
pub mod error;
pub mod metrics;
pub mod normalize;
mod parse;
pub mod pipeline;
pub mod prepare;
pub mod table;
pub mod types;

pub use aggregate::{
    aggregate_by, best_influencer, influencer_aggregates, platform_aggregates, sentiment_summary,
    sort_for_display, top_by_roi,
};
pub use error::{AnalyticsError, MetricError, SchemaError, TableError};
pub use metrics::{engagement, roi, SHARE_WEIGHT};
pub use normalize::{normalize_table, NormalizeOptions, NormalizedTable};
pub use pipeline::{analyze_file, run_pipeline, PipelineOptions, PipelineOutput};
pub use prepare::prepare_dataset;
pub use table::Table;
pub use types::{FallbackReport, NormalizedRow, RowFallbacks};
