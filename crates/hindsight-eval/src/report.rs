//! Ranked percentage reports.

use crate::returns::round2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The figure a [`Report`] ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total return over the window.
    TotalReturn,
    /// Compound annual growth rate over the window.
    Cagr,
}

impl Metric {
    /// Every metric, in export order.
    pub const ALL: [Self; 2] = [Self::TotalReturn, Self::Cagr];

    /// Short name used in file names and headings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalReturn => "Return",
            Self::Cagr => "CAGR",
        }
    }

    /// File name suffix, `returns` or `CAGR`.
    #[must_use]
    pub const fn file_suffix(&self) -> &'static str {
        match self {
            Self::TotalReturn => "returns",
            Self::Cagr => "CAGR",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled, rounded percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Display label, e.g. `"Apple (AAPL)"`.
    pub label: String,
    /// Percentage rounded to two decimals.
    pub value: f64,
}

/// Percentages per symbol, rounded and sorted descending.
///
/// Sorting is stable: rows with equal values keep the order they were given
/// in, so identical input always yields identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    metric: Metric,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Build a report from unrounded `(label, value)` pairs.
    pub fn new(metric: Metric, values: impl IntoIterator<Item = (String, f64)>) -> Self {
        let mut rows: Vec<ReportRow> = values
            .into_iter()
            .map(|(label, value)| ReportRow {
                label,
                value: round2(value),
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        Self { metric, rows }
    }

    /// The ranked figure.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Rows, highest value first.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Value for a label, if present.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sorted_descending_and_rounded() {
        let report = Report::new(
            Metric::TotalReturn,
            [
                ("Nike (NKE)".to_string(), 12.345_6),
                ("Apple (AAPL)".to_string(), 843.219),
                ("S&P 500 (^GSPC)".to_string(), 175.0),
            ],
        );

        let labels: Vec<&str> = report.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple (AAPL)", "S&P 500 (^GSPC)", "Nike (NKE)"]);
        assert_eq!(report.get("Nike (NKE)"), Some(12.35));
        assert_eq!(report.get("Apple (AAPL)"), Some(843.22));
        assert!(report.rows().windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_report_ties_keep_input_order() {
        let report = Report::new(
            Metric::Cagr,
            [
                ("B".to_string(), 5.001),
                ("A".to_string(), 5.0),
                ("C".to_string(), 6.0),
            ],
        );
        let labels: Vec<&str> = report.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_report_near_zero_values_tie() {
        let report = Report::new(
            Metric::TotalReturn,
            [("A".to_string(), 0.0), ("B".to_string(), -0.001), ("C".to_string(), 0.004)],
        );
        let labels: Vec<&str> = report.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert!(report.rows().iter().all(|r| r.value.to_bits() == 0.0_f64.to_bits()));
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::TotalReturn.file_suffix(), "returns");
        assert_eq!(Metric::Cagr.file_suffix(), "CAGR");
        assert_eq!(Metric::Cagr.to_string(), "CAGR");
    }
}
