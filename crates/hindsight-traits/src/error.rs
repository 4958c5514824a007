//! Error types for the hindsight workspace.
//!
//! Every failure that can abort an analysis run is expressed here: data that
//! could not be fetched, tables that are malformed, and price windows that
//! cannot produce a meaningful return.

use thiserror::Error;

/// The main error type for hindsight operations.
#[derive(Debug, Error)]
pub enum HindsightError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a price table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a symbol is not present in the table or universe.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A price that cannot be used as a divisor or exponent base.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// A lookback window that cannot be evaluated.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for HindsightError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for HindsightError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for hindsight operations.
pub type Result<T> = std::result::Result<T, HindsightError>;
