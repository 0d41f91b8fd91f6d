//! Error types for flowta.

use thiserror::Error;

/// Top-level flowta error.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Strategy-specific errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Strategy not found: {0}")]
    NotFound(String),
}

/// Repository errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Report sink errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    #[error("Report not started: {0}")]
    NotStarted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for flowta operations.
pub type FlowResult<T> = Result<T, FlowError>;
