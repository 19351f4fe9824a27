use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fallback `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Optional YAML cost table. The built-in table is used when unset.
    pub cost_table_path: Option<PathBuf>,
    /// Cost substituted for influencers missing from the built-in table.
    pub fallback_cost: f64,
    /// Treat a missing influencer column as a schema error instead of
    /// grouping every row under an empty name.
    pub require_influencer: bool,
    /// Classify rows on the rayon thread pool.
    pub parallel: bool,
    /// Number of influencer rows shown in reports.
    pub top_n: usize,
}
