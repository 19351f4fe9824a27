//! Schema normalization from arbitrary CSV headers to the canonical post shape.
//!
//! Column lookup ignores case. Recognized columns are renamed to their
//! canonical lowercase names, missing numeric columns are appended, and
//! coerced numeric cells are written back, so normalizing an already
//! normalized table changes nothing.

use infdash_core::{CostTable, Sentiment};

use crate::error::SchemaError;
use crate::parse::{coerce_count, format_cost, parse_cost};
use crate::table::Table;
use crate::types::{NormalizedRow, RowFallbacks};

pub const COMMENT: &str = "comment";
pub const INFLUENCER: &str = "influencer";
pub const LIKES: &str = "likes";
pub const SHARES: &str = "shares";
pub const COST: &str = "cost";
pub const PLATFORM: &str = "platform";
pub const SENTIMENT: &str = "sentiment";

pub(crate) const TEXT_SYNONYM: &str = "text";
pub(crate) const INFLUENCER_SYNONYM: &str = "user";
pub(crate) const SHARES_SYNONYM: &str = "retweets";

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Fail with [`SchemaError::MissingInfluencerColumn`] instead of
    /// defaulting every influencer to an empty string.
    pub require_influencer: bool,
}

/// A table with canonical headers and its parsed rows, index-aligned.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub table: Table,
    pub rows: Vec<NormalizedRow>,
    /// The input carried a `platform` column.
    pub has_platform: bool,
}

/// Resolved column positions in the input table.
struct Columns {
    comment: usize,
    influencer: Option<usize>,
    likes: Option<usize>,
    shares: Option<usize>,
    cost: Option<usize>,
    platform: Option<usize>,
    sentiment: Option<usize>,
}

impl Columns {
    fn resolve(table: &Table, options: NormalizeOptions) -> Result<Self, SchemaError> {
        let find = |name: &str| table.column_index(name);
        let present = || table.headers().join(", ");

        let comment = find(COMMENT)
            .or_else(|| find(TEXT_SYNONYM))
            .ok_or_else(|| SchemaError::MissingTextColumn {
                expected: format!("{COMMENT}, {TEXT_SYNONYM}"),
                present: present(),
            })?;

        let influencer = find(INFLUENCER).or_else(|| find(INFLUENCER_SYNONYM));
        if influencer.is_none() && options.require_influencer {
            return Err(SchemaError::MissingInfluencerColumn {
                expected: format!("{INFLUENCER}, {INFLUENCER_SYNONYM}"),
                present: present(),
            });
        }

        Ok(Self {
            comment,
            influencer,
            likes: find(LIKES),
            shares: find(SHARES).or_else(|| find(SHARES_SYNONYM)),
            cost: find(COST),
            platform: find(PLATFORM),
            sentiment: find(SENTIMENT),
        })
    }
}

/// Normalize `table` into the canonical post shape.
///
/// Row order is preserved. Malformed numeric cells never fail: they coerce to
/// `0` (likes, shares) or to the cost table's fallback (cost) and are flagged
/// on the row.
///
/// # Errors
///
/// Returns [`SchemaError::MissingTextColumn`] when neither `comment` nor
/// `text` is present, and [`SchemaError::MissingInfluencerColumn`] when
/// `options.require_influencer` is set and no influencer-like column exists.
pub fn normalize_table(
    mut table: Table,
    costs: &CostTable,
    options: NormalizeOptions,
) -> Result<NormalizedTable, SchemaError> {
    let cols = Columns::resolve(&table, options)?;

    if cols.influencer.is_none() {
        tracing::warn!(
            rows = table.len(),
            "no influencer column; grouping every row under an empty influencer"
        );
    }

    let rows: Vec<NormalizedRow> = (0..table.len())
        .map(|i| normalize_row(&table, i, &cols, costs))
        .collect();

    for (col, name) in [
        (Some(cols.comment), COMMENT),
        (cols.influencer, INFLUENCER),
        (cols.likes, LIKES),
        (cols.shares, SHARES),
        (cols.cost, COST),
        (cols.platform, PLATFORM),
        (cols.sentiment, SENTIMENT),
    ] {
        if let Some(col) = col {
            table.rename_column(col, name);
        }
    }

    if cols.influencer.is_none() {
        table.set_column(INFLUENCER, vec![String::new(); rows.len()]);
    }
    table.set_column(LIKES, rows.iter().map(|r| r.likes.to_string()).collect());
    table.set_column(SHARES, rows.iter().map(|r| r.shares.to_string()).collect());
    table.set_column(COST, rows.iter().map(|r| format_cost(r.cost)).collect());

    Ok(NormalizedTable {
        table,
        rows,
        has_platform: cols.platform.is_some(),
    })
}

fn normalize_row(table: &Table, i: usize, cols: &Columns, costs: &CostTable) -> NormalizedRow {
    let mut fallbacks = RowFallbacks::default();
    let cell = |col: usize| table.cell(i, col);

    let influencer = if let Some(col) = cols.influencer {
        cell(col).to_string()
    } else {
        fallbacks.influencer = true;
        String::new()
    };

    let likes = cols.likes.map_or(0, |col| {
        let (n, fell_back) = coerce_count(cell(col));
        fallbacks.likes = fell_back;
        n
    });

    let shares = cols.shares.map_or(0, |col| {
        let (n, fell_back) = coerce_count(cell(col));
        fallbacks.shares = fell_back;
        n
    });

    let cost = if let Some(col) = cols.cost {
        parse_cost(cell(col)).unwrap_or_else(|| {
            tracing::debug!(row = i, raw = cell(col), "unusable cost cell; using fallback");
            fallbacks.cost = true;
            costs.fallback_cost()
        })
    } else {
        costs.lookup(&influencer).unwrap_or_else(|| {
            fallbacks.cost = true;
            costs.fallback_cost()
        })
    };

    let trusted_sentiment = cols.sentiment.and_then(|col| {
        let label = Sentiment::from_label(cell(col));
        if label.is_none() {
            tracing::debug!(row = i, raw = cell(col), "unrecognized sentiment label; re-scoring");
            fallbacks.sentiment_label = true;
        }
        label
    });

    NormalizedRow {
        influencer,
        comment: cell(cols.comment).to_string(),
        likes,
        shares,
        cost,
        platform: cols.platform.map(|col| cell(col).to_string()),
        trusted_sentiment,
        fallbacks,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
