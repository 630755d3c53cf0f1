use super::config::ConfigError;
use crate::core::models::table::TableError;
use crate::core::stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing fold-change value for site '{site}'; drop missing values before scoring")]
    MissingFoldChange { site: String },

    #[error("Population standard deviation must be positive and finite, got {0}")]
    InvalidPopulationStd(f64),

    #[error("Population mean must be finite, got {0}")]
    InvalidPopulationMean(f64),

    #[error("Cannot derive population statistics from an empty fold-change vector")]
    EmptyFoldChanges,

    #[error("Method '{method}' requires p-values but none were provided")]
    MissingPValues { method: &'static str },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Statistical computation failed: {source}")]
    Stats {
        #[from]
        source: StatsError,
    },

    #[error("Table access failed: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
