//! Batch pipeline orchestration.

use std::path::Path;

use infdash_core::{
    BestInfluencer, CostTable, GroupAggregate, PostRecord, Sentiment, SentimentShare,
};
use infdash_sentiment::FusionEngine;
use rayon::prelude::*;

use crate::aggregate::{
    best_influencer, influencer_aggregates, platform_aggregates, sentiment_summary,
};
use crate::error::{AnalyticsError, SchemaError};
use crate::metrics;
use crate::normalize::{normalize_table, NormalizeOptions, SENTIMENT};
use crate::table::Table;
use crate::types::{FallbackReport, NormalizedRow, RowFallbacks};

pub const VADER: &str = "vader";
pub const TEXTBLOB: &str = "textblob";
pub const ENGAGEMENT: &str = "engagement";
pub const ROI: &str = "roi";

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub normalize: NormalizeOptions,
    /// Classify rows on the rayon pool.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            parallel: true,
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized input columns plus the derived ones.
    pub table: Table,
    pub records: Vec<PostRecord>,
    /// First-encounter order; use [`crate::aggregate::sort_for_display`] to rank.
    pub influencers: Vec<GroupAggregate>,
    pub platforms: Option<Vec<GroupAggregate>>,
    pub best: Option<BestInfluencer>,
    pub summary: Vec<SentimentShare>,
    pub fallbacks: FallbackReport,
}

/// Run the full pipeline over an in-memory table.
///
/// 1. Normalize the schema (see [`normalize_table`]).
/// 2. Classify each row without a trusted label through `engine`.
/// 3. Derive engagement and ROI per row.
/// 4. Aggregate by influencer (and by platform when the column exists).
///
/// Row-level problems never abort the run; they are counted in
/// [`PipelineOutput::fallbacks`].
///
/// # Errors
///
/// Returns [`SchemaError`] if the table has no usable text column, or no
/// influencer column while `options.normalize.require_influencer` is set.
pub fn run_pipeline(
    table: Table,
    costs: &CostTable,
    engine: &FusionEngine,
    options: &PipelineOptions,
) -> Result<PipelineOutput, SchemaError> {
    let normalized = normalize_table(table, costs, options.normalize)?;

    let derived: Vec<(PostRecord, RowFallbacks)> = if options.parallel {
        normalized
            .rows
            .par_iter()
            .enumerate()
            .map(|(i, row)| derive_record(i, row, engine))
            .collect()
    } else {
        normalized
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| derive_record(i, row, engine))
            .collect()
    };
    let (records, row_fallbacks): (Vec<PostRecord>, Vec<RowFallbacks>) =
        derived.into_iter().unzip();

    let mut table = normalized.table;
    write_derived_columns(&mut table, &records);

    let influencers = influencer_aggregates(&records);
    let platforms = if normalized.has_platform {
        platform_aggregates(&records)
    } else {
        None
    };
    let best = best_influencer(&influencers);
    let summary = sentiment_summary(&records);
    let fallbacks = FallbackReport::from_rows(&row_fallbacks);

    if fallbacks.rows > 0 {
        tracing::warn!(
            fallback_rows = fallbacks.rows,
            cost = fallbacks.cost,
            classifier = fallbacks.classifier,
            roi = fallbacks.roi,
            "some rows used fallback values"
        );
    }
    tracing::info!(
        rows = records.len(),
        influencers = influencers.len(),
        fallback_rows = fallbacks.rows,
        best = best.as_ref().map_or("-", |b| b.influencer.as_str()),
        "pipeline complete"
    );

    Ok(PipelineOutput {
        table,
        records,
        influencers,
        platforms,
        best,
        summary,
        fallbacks,
    })
}

/// Read `input`, run the pipeline, and write the processed table to `output`.
///
/// # Errors
///
/// Returns [`AnalyticsError`] on CSV read/write failures or schema errors.
pub fn analyze_file(
    input: &Path,
    output: &Path,
    costs: &CostTable,
    engine: &FusionEngine,
    options: &PipelineOptions,
) -> Result<PipelineOutput, AnalyticsError> {
    let table = Table::read_csv(input)?;
    tracing::info!(path = %input.display(), rows = table.len(), "loaded input");
    let out = run_pipeline(table, costs, engine, options)?;
    out.table.write_csv(output)?;
    tracing::info!(path = %output.display(), rows = out.table.len(), "wrote processed data");
    Ok(out)
}

fn derive_record(
    index: usize,
    row: &NormalizedRow,
    engine: &FusionEngine,
) -> (PostRecord, RowFallbacks) {
    let mut fallbacks = row.fallbacks;

    let (sentiment_vader, sentiment_textblob, sentiment) = match row.trusted_sentiment {
        Some(label) => (None, None, label),
        None => {
            let fused = engine.classify(&row.comment);
            fallbacks.classifier = fused.failures > 0;
            (Some(fused.vader), Some(fused.textblob), fused.sentiment)
        }
    };

    let engagement = metrics::engagement(row.likes, row.shares);
    let roi = match metrics::roi(engagement, row.cost) {
        Ok(roi) => Some(roi),
        Err(e) => {
            tracing::warn!(
                row = index,
                influencer = %row.influencer,
                error = %e,
                "ROI undefined; excluding row from ROI means"
            );
            fallbacks.roi = true;
            None
        }
    };

    let record = PostRecord {
        influencer: row.influencer.clone(),
        comment: row.comment.clone(),
        likes: row.likes,
        shares: row.shares,
        cost: row.cost,
        platform: row.platform.clone(),
        sentiment_vader,
        sentiment_textblob,
        sentiment,
        engagement,
        roi,
    };
    (record, fallbacks)
}

/// Append or overwrite `vader`, `textblob`, `sentiment`, `engagement`, `roi`.
///
/// Rows with a trusted label keep their original `sentiment` cell and get
/// empty classifier cells.
fn write_derived_columns(table: &mut Table, records: &[PostRecord]) {
    let label_cell = |label: Option<Sentiment>| {
        label.map_or_else(String::new, |l| l.as_str().to_string())
    };

    let existing_sentiment = table.column_index(SENTIMENT);
    let sentiment_cells: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(i, r)| match (r.sentiment_vader, existing_sentiment) {
            (None, Some(col)) => table.cell(i, col).to_string(),
            _ => r.sentiment.as_str().to_string(),
        })
        .collect();

    table.set_column(VADER, records.iter().map(|r| label_cell(r.sentiment_vader)).collect());
    table.set_column(
        TEXTBLOB,
        records.iter().map(|r| label_cell(r.sentiment_textblob)).collect(),
    );
    table.set_column(SENTIMENT, sentiment_cells);
    table.set_column(
        ENGAGEMENT,
        records.iter().map(|r| r.engagement.to_string()).collect(),
    );
    table.set_column(
        ROI,
        records
            .iter()
            .map(|r| r.roi.map_or_else(String::new, |v| v.to_string()))
            .collect(),
    );
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
