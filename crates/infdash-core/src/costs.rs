//! Influencer spend lookup used when an input table carries no `cost` column.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cost assigned to influencers that have no entry in the table.
pub const DEFAULT_FALLBACK_COST: f64 = 3000.0;

const BUILTIN_COSTS: &[(&str, f64)] = &[("alice", 2500.0), ("bob", 1800.0), ("carol", 4000.0)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub name: String,
    pub cost: f64,
}

#[derive(Debug, Deserialize)]
struct CostFile {
    #[serde(default)]
    fallback_cost: Option<f64>,
    #[serde(default)]
    influencers: Vec<CostEntry>,
}

/// Read-only influencer -> spend mapping with a fallback for unknown names.
///
/// Lookups fold case; the grouping stage downstream does not.
#[derive(Debug, Clone)]
pub struct CostTable {
    by_name: HashMap<String, f64>,
    fallback_cost: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CostTable {
    /// The stock `{alice: 2500, bob: 1800, carol: 4000}` table with a 3000 fallback.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_COSTS
            .iter()
            .map(|&(name, cost)| CostEntry {
                name: name.to_string(),
                cost,
            })
            .collect::<Vec<_>>();
        Self::from_entries(&entries, DEFAULT_FALLBACK_COST)
    }

    /// Build a table from explicit entries. Names are folded to lowercase;
    /// later duplicates overwrite earlier ones (use [`load_cost_table`] for
    /// validated input).
    #[must_use]
    pub fn from_entries(entries: &[CostEntry], fallback_cost: f64) -> Self {
        let by_name = entries
            .iter()
            .map(|e| (e.name.trim().to_lowercase(), e.cost))
            .collect();
        Self {
            by_name,
            fallback_cost,
        }
    }

    /// Replace the fallback cost, keeping the entries.
    #[must_use]
    pub fn with_fallback(mut self, fallback_cost: f64) -> Self {
        self.fallback_cost = fallback_cost;
        self
    }

    #[must_use]
    pub fn fallback_cost(&self) -> f64 {
        self.fallback_cost
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Case-insensitive lookup. `None` when the influencer has no entry.
    #[must_use]
    pub fn lookup(&self, influencer: &str) -> Option<f64> {
        self.by_name
            .get(&influencer.trim().to_lowercase())
            .copied()
    }

    /// Spend attributed to `influencer`, falling back to [`Self::fallback_cost`].
    #[must_use]
    pub fn cost_for(&self, influencer: &str) -> f64 {
        self.lookup(influencer).unwrap_or(self.fallback_cost)
    }
}

/// Load and validate a cost table from a YAML file.
///
/// ```yaml
/// fallback_cost: 3000
/// influencers:
///   - name: alice
///     cost: 2500
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_cost_table(path: &Path) -> Result<CostTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CostTableIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_cost_table(&content)
}

fn parse_cost_table(content: &str) -> Result<CostTable, ConfigError> {
    let file: CostFile = serde_yaml::from_str(content).map_err(ConfigError::CostTableParse)?;
    validate_costs(&file)?;

    Ok(CostTable::from_entries(
        &file.influencers,
        file.fallback_cost.unwrap_or(DEFAULT_FALLBACK_COST),
    ))
}

fn validate_costs(file: &CostFile) -> Result<(), ConfigError> {
    if let Some(fallback) = file.fallback_cost {
        if !fallback.is_finite() || fallback <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "fallback_cost must be positive, got {fallback}"
            )));
        }
    }

    let mut seen = HashSet::new();
    for entry in &file.influencers {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "influencer name must be non-empty".to_string(),
            ));
        }

        // Zero is accepted here; the metric stage rejects it per record.
        if !entry.cost.is_finite() || entry.cost < 0.0 {
            return Err(ConfigError::Validation(format!(
                "influencer '{}' has invalid cost {}; must be a non-negative number",
                entry.name, entry.cost
            )));
        }

        if !seen.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate influencer name: '{}'",
                entry.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "costs_test.rs"]
mod tests;
