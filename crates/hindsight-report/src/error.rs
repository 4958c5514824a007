//! Error types for report output.

use thiserror::Error;

/// Errors raised while writing reports or charts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart drawing error.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Error reading the price table.
    #[error(transparent)]
    Table(#[from] hindsight_traits::HindsightError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_traits::HindsightError;

    #[test]
    fn test_error_display() {
        let err = ReportError::Chart("no data".to_string());
        assert_eq!(err.to_string(), "Chart error: no data");

        let err: ReportError = HindsightError::InvalidPrice("NKE first price is 0".to_string()).into();
        assert_eq!(err.to_string(), "Invalid price: NKE first price is 0");
    }
}
