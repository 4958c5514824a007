//! Lookback windows and the file names derived from them.

use crate::report::Metric;
use chrono::{Datelike, Months};
use hindsight_traits::{Date, HindsightError, PriceTable, Result};
use serde::{Deserialize, Serialize};

/// How a window selects rows from the price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowScope {
    /// The whole fetched history; `years` only feeds the CAGR exponent.
    Full,
    /// `[last_date - years, last_date]`, inclusive on both ends.
    Trailing,
}

/// A named lookback window, e.g. `5_year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Label used in file names and headings, e.g. `"5_year"`.
    pub label: String,
    /// Window length in whole years.
    pub years: u32,
    /// Row selection.
    pub scope: WindowScope,
}

impl Window {
    /// The whole history, treated as `years` long.
    pub fn full(label: impl Into<String>, years: u32) -> Self {
        Self {
            label: label.into(),
            years,
            scope: WindowScope::Full,
        }
    }

    /// The trailing `years` ending at the last available date.
    pub fn trailing(label: impl Into<String>, years: u32) -> Self {
        Self {
            label: label.into(),
            years,
            scope: WindowScope::Trailing,
        }
    }

    /// First date of a trailing window anchored at `last`.
    ///
    /// Calendar years are subtracted with month arithmetic, so Feb 29
    /// maps to Feb 28 in non-leap years.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InvalidWindow`] if the date underflows.
    pub fn start_from(&self, last: Date) -> Result<Date> {
        last.checked_sub_months(Months::new(self.years.saturating_mul(12)))
            .ok_or_else(|| {
                HindsightError::InvalidWindow(format!(
                    "{} years before {last} is out of range",
                    self.years
                ))
            })
    }

    /// Select this window's rows from `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or the window is invalid.
    pub fn apply(&self, table: &PriceTable) -> Result<PriceTable> {
        if self.years == 0 {
            return Err(HindsightError::InvalidWindow(format!(
                "window '{}' has zero length",
                self.label
            )));
        }

        match self.scope {
            WindowScope::Full => {
                if table.is_empty() {
                    return Err(HindsightError::InsufficientData(
                        "price table is empty".to_string(),
                    ));
                }
                Ok(table.clone())
            }
            WindowScope::Trailing => {
                let last = table.last_date()?;
                let start = self.start_from(last)?;
                tracing::debug!(window = %self.label, %start, end = %last, "slicing window");
                table.slice(start, last)
            }
        }
    }

    /// Label with every word capitalised, e.g. `5_year` -> `5_Year`.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label
            .split('_')
            .map(|part| {
                let mut chars = part.chars();
                chars.next().map_or_else(String::new, |c| {
                    c.to_uppercase().chain(chars).collect::<String>()
                })
            })
            .collect::<Vec<_>>()
            .join("_")
    }

    /// CSV file name for a metric's report, e.g. `5_year_CAGR.csv`.
    #[must_use]
    pub fn report_file_name(&self, metric: Metric) -> String {
        format!("{}_{}.csv", self.label, metric.file_suffix())
    }

    /// PNG file name for the normalized chart.
    #[must_use]
    pub fn chart_file_name(&self) -> String {
        match self.scope {
            WindowScope::Full => format!("{}_chart.png", self.label),
            WindowScope::Trailing => format!("{}_normalized_chart.png", self.display_label()),
        }
    }

    /// Chart title; the full window names its calendar span.
    #[must_use]
    pub fn chart_title(&self, first: Date, last: Date) -> String {
        match self.scope {
            WindowScope::Full => format!(
                "{}-Year Stock Performance Comparison ({}–{})",
                self.years,
                first.year(),
                last.year()
            ),
            WindowScope::Trailing => {
                format!("{} Stock Performance Comparison", self.display_label())
            }
        }
    }
}

/// The 10-year history plus the trailing 5-year and 1-year windows.
#[must_use]
pub fn default_windows() -> Vec<Window> {
    vec![
        Window::full("10_year", 10),
        Window::trailing("5_year", 5),
        Window::trailing("1_year", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_traits::PriceSeries;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_start_from() {
        let w = Window::trailing("5_year", 5);
        assert_eq!(w.start_from(d(2024, 6, 1)).unwrap(), d(2019, 6, 1));

        let leap = Window::trailing("1_year", 1);
        assert_eq!(leap.start_from(d(2024, 2, 29)).unwrap(), d(2023, 2, 28));
    }

    #[test]
    fn test_trailing_window_is_inclusive() {
        let series = PriceSeries::new(
            "AAPL",
            [
                (d(2019, 5, 31), 1.0),
                (d(2019, 6, 1), 2.0),
                (d(2022, 1, 3), 3.0),
                (d(2024, 6, 1), 4.0),
            ],
        );
        let table = PriceTable::from_series(&[series]).unwrap();
        let sliced = Window::trailing("5_year", 5).apply(&table).unwrap();

        assert_eq!(
            sliced.dates().unwrap(),
            vec![d(2019, 6, 1), d(2022, 1, 3), d(2024, 6, 1)]
        );

        let full = Window::full("10_year", 10).apply(&table).unwrap();
        assert_eq!(full.len(), 4);
    }

    #[test]
    fn test_zero_year_window_rejected() {
        let table = PriceTable::from_series(&[PriceSeries::new("A", [(d(2024, 1, 1), 1.0)])]).unwrap();
        assert!(matches!(
            Window::trailing("0_year", 0).apply(&table),
            Err(HindsightError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_file_names() {
        let windows = default_windows();
        assert_eq!(windows[0].report_file_name(Metric::TotalReturn), "10_year_returns.csv");
        assert_eq!(windows[0].report_file_name(Metric::Cagr), "10_year_CAGR.csv");
        assert_eq!(windows[0].chart_file_name(), "10_year_chart.png");
        assert_eq!(windows[1].report_file_name(Metric::TotalReturn), "5_year_returns.csv");
        assert_eq!(windows[1].chart_file_name(), "5_Year_normalized_chart.png");
        assert_eq!(windows[2].chart_file_name(), "1_Year_normalized_chart.png");
    }

    #[test]
    fn test_chart_titles() {
        let windows = default_windows();
        assert_eq!(
            windows[0].chart_title(d(2014, 6, 2), d(2024, 5, 31)),
            "10-Year Stock Performance Comparison (2014–2024)"
        );
        assert_eq!(
            windows[1].chart_title(d(2019, 6, 3), d(2024, 5, 31)),
            "5_Year Stock Performance Comparison"
        );
    }
}
