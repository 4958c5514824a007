//! Analysis configuration.

use crate::window::{Window, default_windows};
use hindsight_traits::{Date, DateRange, HindsightError, Listing, Result, Universe};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::PathBuf};

/// Configuration for one analysis run.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Equities to analyse, in report order.
    pub equities: Vec<Listing>,
    /// Benchmark index, included in return reports and charts.
    pub index: Option<Listing>,
    /// First date requested from the provider (inclusive).
    pub start: Date,
    /// End of the requested range (exclusive).
    pub end: Date,
    /// Capital invested per ticker by the best-entry search.
    pub capital: f64,
    /// Windows analysed, in order.
    pub windows: Vec<Window>,
    /// Directory receiving CSV and PNG files.
    pub output_dir: PathBuf,
    /// Whether to render charts.
    pub charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            equities: vec![
                Listing::new("TSM", "TSMC"),
                Listing::new("AAPL", "Apple"),
                Listing::new("NKE", "Nike"),
            ],
            index: Some(Listing::new("^GSPC", "S&P 500")),
            start: Date::from_ymd_opt(2014, 6, 1).unwrap_or_default(),
            end: Date::from_ymd_opt(2024, 6, 1).unwrap_or_default(),
            capital: 10_000_000.0,
            windows: default_windows(),
            output_dir: PathBuf::from("."),
            charts: true,
        }
    }
}

impl AnalysisConfig {
    /// Check the configuration for values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or inverted date range, non-positive
    /// capital, no equities, duplicate tickers, an empty window list, a
    /// zero-length window or duplicate window labels.
    pub fn validate(&self) -> Result<()> {
        self.range()?;
        self.universe()?;

        if !(self.capital.is_finite() && self.capital > 0.0) {
            return Err(HindsightError::InvalidData(format!(
                "capital must be positive, got {}",
                self.capital
            )));
        }

        if self.windows.is_empty() {
            return Err(HindsightError::InvalidWindow(
                "at least one window is required".to_string(),
            ));
        }
        let mut labels = HashSet::new();
        for window in &self.windows {
            if window.years == 0 {
                return Err(HindsightError::InvalidWindow(format!(
                    "window '{}' has zero length",
                    window.label
                )));
            }
            if !labels.insert(window.label.as_str()) {
                return Err(HindsightError::InvalidWindow(format!(
                    "duplicate window label '{}'",
                    window.label
                )));
            }
        }

        Ok(())
    }

    /// The universe described by `equities` and `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no equities or a ticker repeats.
    pub fn universe(&self) -> Result<Universe> {
        Universe::new(self.equities.clone(), self.index.clone())
    }

    /// The requested date range.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InvalidDate`] unless `start < end`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start, self.end)
    }
}
