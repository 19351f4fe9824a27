//! Reshape a raw social-media export into the analysis input layout.

use infdash_core::CostTable;

use crate::error::SchemaError;
use crate::metrics;
use crate::normalize::{
    normalize_table, NormalizeOptions, COMMENT, INFLUENCER, INFLUENCER_SYNONYM, LIKES, PLATFORM,
    SENTIMENT, SHARES, SHARES_SYNONYM, TEXT_SYNONYM,
};
use crate::pipeline::{ENGAGEMENT, ROI};
use crate::table::Table;

/// Columns kept from the raw export, in output order. The canonical name is
/// tried before the raw export's name.
const KEPT: &[(&str, Option<&str>)] = &[
    (INFLUENCER, Some(INFLUENCER_SYNONYM)),
    (COMMENT, Some(TEXT_SYNONYM)),
    (SENTIMENT, None),
    (LIKES, None),
    (SHARES, Some(SHARES_SYNONYM)),
    (PLATFORM, None),
];

/// Keep the analysis columns of `raw`, rename them, assign costs through
/// `costs`, and append `engagement` and `roi`.
///
/// Every other column is dropped. Rows whose cost cannot support a ratio get
/// an empty `roi` cell.
///
/// # Errors
///
/// Returns [`SchemaError::MissingTextColumn`] when `raw` has neither a
/// `text` nor a `comment` column.
pub fn prepare_dataset(raw: &Table, costs: &CostTable) -> Result<Table, SchemaError> {
    let columns: Vec<usize> = KEPT
        .iter()
        .filter_map(|&(name, synonym)| {
            raw.column_index(name)
                .or_else(|| synonym.and_then(|s| raw.column_index(s)))
        })
        .collect();

    if raw.column_index(COMMENT).is_none() && raw.column_index(TEXT_SYNONYM).is_none() {
        return Err(SchemaError::MissingTextColumn {
            expected: format!("{COMMENT}, {TEXT_SYNONYM}"),
            present: raw.headers().join(", "),
        });
    }

    let dropped = raw.headers().len().saturating_sub(columns.len());
    if dropped > 0 {
        tracing::debug!(dropped, "dropping columns not used for analysis");
    }

    let normalized = normalize_table(raw.project(&columns), costs, NormalizeOptions::default())?;
    let mut table = normalized.table;

    let (engagement, roi): (Vec<String>, Vec<String>) = normalized
        .rows
        .iter()
        .map(|row| {
            let engagement = metrics::engagement(row.likes, row.shares);
            let roi = match metrics::roi(engagement, row.cost) {
                Ok(v) => v.to_string(),
                Err(e) => {
                    tracing::warn!(influencer = %row.influencer, error = %e, "ROI undefined");
                    String::new()
                }
            };
            (engagement.to_string(), roi)
        })
        .unzip();
    table.set_column(ENGAGEMENT, engagement);
    table.set_column(ROI, roi);

    tracing::info!(rows = table.len(), "prepared dataset");
    Ok(table)
}
