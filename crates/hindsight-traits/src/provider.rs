//! Price provider trait for market-data sources.
//!
//! This module defines the `PriceProvider` trait, the single seam between
//! the analysis pipeline and the outside world. A provider turns a list of
//! symbols and a date range into a [`PriceTable`] of closing prices.

use crate::{DateRange, PriceTable, Result, Symbol};
use std::future::Future;

/// A source of daily closing prices.
///
/// Implementations fetch adjusted closes for every requested symbol over
/// `[range.start, range.end)` and align them into one [`PriceTable`].
/// Missing trading days are expected and must be left as nulls rather than
/// reported as errors.
///
/// # Example
///
/// ```no_run
/// use hindsight_traits::{DateRange, PriceProvider, PriceSeries, PriceTable, Result, Symbol};
///
/// struct Fixed(Vec<PriceSeries>);
///
/// impl PriceProvider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch(&self, _symbols: &[Symbol], _range: DateRange) -> Result<PriceTable> {
///         PriceTable::from_series(&self.0)
///     }
/// }
/// ```
pub trait PriceProvider: Send + Sync {
    /// Short name used in logs, e.g. `"yahoo"`.
    fn name(&self) -> &str;

    /// Fetch closing prices for `symbols` over `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails or has no data at
    /// all for one of the requested symbols. No retry is attempted.
    fn fetch(
        &self,
        symbols: &[Symbol],
        range: DateRange,
    ) -> impl Future<Output = Result<PriceTable>> + Send;
}
