//! Error types for market data providers.

use hindsight_traits::HindsightError;
use thiserror::Error;

/// Errors that can occur while fetching or loading prices.
#[derive(Debug, Error)]
pub enum DataError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned an error.
    #[error("API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, try again later")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),

    /// CSV reading failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A value in a local file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required column missing from a local file.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Assembling the price table failed.
    #[error(transparent)]
    Table(#[from] HindsightError),
}

impl From<DataError> for HindsightError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Table(inner) => inner,
            DataError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
            other => Self::DataFetch(other.to_string()),
        }
    }
}
