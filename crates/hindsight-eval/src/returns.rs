//! Total return and compound annual growth rate.
//!
//! All figures are percentages. Both calculators take the first and last
//! available price of a window; the window length for CAGR is a whole number
//! of years.

use hindsight_traits::{Date, HindsightError, PriceSeries, Result};
use serde::{Deserialize, Serialize};

/// Round to two decimals, the precision of every exported figure.
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// Reject prices that cannot serve as a ratio term.
pub(crate) fn ensure_positive(symbol: &str, what: &str, price: f64) -> Result<()> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(HindsightError::InvalidPrice(format!(
            "{symbol} {what} price is {price}"
        )))
    }
}

/// Total return in percent: `(last / first - 1) * 100`.
#[must_use]
pub fn total_return_pct(first: f64, last: f64) -> f64 {
    (last / first - 1.0) * 100.0
}

/// Compound annual growth rate in percent over `years` years.
#[must_use]
pub fn cagr_pct(first: f64, last: f64, years: u32) -> f64 {
    ((last / first).powf(1.0 / f64::from(years)) - 1.0) * 100.0
}

/// Unrounded return figures of one symbol over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReturn {
    /// Ticker symbol.
    pub symbol: String,
    /// First date with a price inside the window.
    pub start_date: Date,
    /// Price on `start_date`.
    pub start_price: f64,
    /// Last date with a price inside the window.
    pub end_date: Date,
    /// Price on `end_date`.
    pub end_price: f64,
    /// Total return in percent.
    pub total_return: f64,
    /// CAGR in percent.
    pub cagr: f64,
}

impl WindowReturn {
    /// Compute returns for a (windowed) series over `years` years.
    ///
    /// # Errors
    ///
    /// - [`HindsightError::InvalidWindow`] if `years` is zero
    /// - [`HindsightError::InsufficientData`] if the series has fewer than two points
    /// - [`HindsightError::InvalidPrice`] if an end point is not a positive number
    pub fn compute(series: &PriceSeries, years: u32) -> Result<Self> {
        if years == 0 {
            return Err(HindsightError::InvalidWindow(
                "window length must be at least one year".to_string(),
            ));
        }

        let symbol = series.symbol();
        let (Some((start_date, start_price)), Some((end_date, end_price))) =
            (series.first(), series.last())
        else {
            return Err(HindsightError::InsufficientData(format!(
                "{symbol} has no prices in the window"
            )));
        };
        if series.len() < 2 {
            return Err(HindsightError::InsufficientData(format!(
                "{symbol} needs at least 2 prices in the window, got {}",
                series.len()
            )));
        }

        ensure_positive(symbol, "first", start_price)?;
        ensure_positive(symbol, "last", end_price)?;

        Ok(Self {
            symbol: symbol.to_string(),
            start_date,
            start_price,
            end_date,
            end_price,
            total_return: total_return_pct(start_price, end_price),
            cagr: cagr_pct(start_price, end_price, years),
        })
    }
}
