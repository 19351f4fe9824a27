//! Shared types and configuration for the influencer analytics workspace.

pub mod app_config;
pub mod config;
pub mod costs;
pub mod records;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use costs::{load_cost_table, CostEntry, CostTable, DEFAULT_FALLBACK_COST};
pub use records::{BestInfluencer, GroupAggregate, PostRecord, Sentiment, SentimentShare};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read cost table {path}: {source}")]
    CostTableIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse cost table: {0}")]
    CostTableParse(#[source] serde_yaml::Error),

    #[error("cost table validation failed: {0}")]
    Validation(String),
}
