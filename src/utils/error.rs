//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading per-chain CSV snapshots
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data source unavailable: {0}")]
    DataUnavailable(String),

    #[error("CSV read failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur while normalizing chain records
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("malformed projects field at row {row}: {reason}")]
    MalformedProjectsField { row: usize, reason: String },
}

/// Errors that can occur during per-chain aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("division by zero computing {metric} for chain {chain}")]
    DivisionByZero { chain: String, metric: &'static str },

    // Defensive: a chain only enters the unified table if it produced
    // at least one record.
    #[error("empty group for chain {0}")]
    EmptyGroup(String),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no data points to chart: {0}")]
    EmptySeries(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors surfaced at the dashboard interaction boundary
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("unknown chain identifier: {0}")]
    ChainNotFound(String),

    #[error("chart rendering failed: {0}")]
    ChartFailed(#[from] ChartError),
}
