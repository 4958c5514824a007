//! Common types used throughout the hindsight workspace.
//!
//! This module defines the price containers every component consumes
//! ([`PriceTable`], [`PriceSeries`]) along with the symbol universe and the
//! date range a provider is asked to cover.

use crate::{HindsightError, Result};
use chrono::Datelike;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. `"AAPL"` or `"^GSPC"`.
pub type Symbol = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
///
/// Polars stores `Date` values as days since the Unix epoch.
pub const CE_TO_UNIX_EPOCH_DAYS: i32 = 719_163;

/// Name of the date index column of a [`PriceTable`].
pub const DATE_COLUMN: &str = "date";

/// Convert a Polars date (days since the Unix epoch) to a [`Date`].
#[must_use]
pub fn date_from_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days + CE_TO_UNIX_EPOCH_DAYS)
}

/// Convert a [`Date`] to days since the Unix epoch.
#[must_use]
pub fn days_from_date(date: Date) -> i32 {
    date.num_days_from_ce() - CE_TO_UNIX_EPOCH_DAYS
}

/// A half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included in the range.
    pub start: Date,
    /// First date excluded from the range.
    pub end: Date,
}

impl DateRange {
    /// Create a new range, rejecting empty or inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InvalidDate`] if `start >= end`.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start >= end {
            return Err(HindsightError::InvalidDate(format!(
                "range start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether `date` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

/// A tradable instrument and its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Display name, e.g. `"Apple"`.
    pub name: String,
}

impl Listing {
    /// Create a new listing.
    pub fn new(ticker: impl Into<Symbol>, name: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
        }
    }

    /// Display label used in reports and chart legends, e.g. `"Apple (AAPL)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.ticker)
    }
}

/// The set of analysed equities plus the market index used as a benchmark.
///
/// Order is significant: it is the order symbols are fetched in and the
/// stable secondary order of every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    /// Equities analysed individually (and by the best-entry search).
    pub equities: Vec<Listing>,
    /// Market index included in return reports and charts only.
    pub index: Option<Listing>,
}

impl Universe {
    /// Create a universe, rejecting duplicate tickers.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InvalidData`] if there are no equities or a
    /// ticker appears twice.
    pub fn new(equities: Vec<Listing>, index: Option<Listing>) -> Result<Self> {
        if equities.is_empty() {
            return Err(HindsightError::InvalidData(
                "universe needs at least one equity".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for listing in equities.iter().chain(index.iter()) {
            if !seen.insert(listing.ticker.as_str()) {
                return Err(HindsightError::InvalidData(format!(
                    "duplicate ticker {}",
                    listing.ticker
                )));
            }
        }

        Ok(Self { equities, index })
    }

    /// All listings, equities first and the index last.
    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.equities.iter().chain(self.index.iter())
    }

    /// All tickers in universe order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.listings().map(|l| l.ticker.clone()).collect()
    }

    /// Display label for a ticker, falling back to the bare ticker.
    #[must_use]
    pub fn label(&self, symbol: &str) -> String {
        self.listings()
            .find(|l| l.ticker == symbol)
            .map_or_else(|| symbol.to_string(), Listing::label)
    }

    /// Whether `symbol` is the market index.
    #[must_use]
    pub fn is_index(&self, symbol: &str) -> bool {
        self.index.as_ref().is_some_and(|l| l.ticker == symbol)
    }
}

/// Closing prices of one symbol, ascending by date, without gaps filled in.
///
/// Missing trading days are simply absent; non-finite prices are dropped on
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<(Date, f64)>,
}

impl PriceSeries {
    /// Build a series from unordered points.
    ///
    /// Points are sorted by date; for duplicate dates the last one wins.
    pub fn new(symbol: impl Into<Symbol>, points: impl IntoIterator<Item = (Date, f64)>) -> Self {
        let mut by_date = BTreeMap::new();
        for (date, price) in points {
            if price.is_finite() {
                by_date.insert(date, price);
            }
        }

        Self {
            symbol: symbol.into(),
            points: by_date.into_iter().collect(),
        }
    }

    /// The symbol this series belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The `(date, price)` points in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[(Date, f64)] {
        &self.points
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First observation.
    #[must_use]
    pub fn first(&self) -> Option<(Date, f64)> {
        self.points.first().copied()
    }

    /// Last observation.
    #[must_use]
    pub fn last(&self) -> Option<(Date, f64)> {
        self.points.last().copied()
    }
}

/// Date-indexed closing prices for a set of symbols.
///
/// `PriceTable` wraps a Polars DataFrame with a `date` column of dtype
/// `Date` and one `Float64` column per symbol. Rows are strictly ascending
/// by date; a null cell means the symbol did not trade (or had no quote)
/// on that date.
///
/// # Example
///
/// ```no_run
/// use hindsight_traits::{Date, PriceSeries, PriceTable};
///
/// let d = |day| Date::from_ymd_opt(2024, 1, day).unwrap();
/// let aapl = PriceSeries::new("AAPL", [(d(2), 185.6), (d(3), 184.2)]);
/// let table = PriceTable::from_series(&[aapl]).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PriceTable {
    data: DataFrame,
}

impl PriceTable {
    /// Wrap an existing DataFrame after validating its schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the `date` column is missing or not of dtype
    /// `Date`, a price column is not `Float64`, or dates are not strictly
    /// ascending.
    pub fn new(data: DataFrame) -> Result<Self> {
        let date_col = data
            .column(DATE_COLUMN)
            .map_err(|_| HindsightError::MissingColumn(DATE_COLUMN.to_string()))?;
        if date_col.dtype() != &DataType::Date {
            return Err(HindsightError::InvalidData(format!(
                "column '{DATE_COLUMN}' has dtype {}, expected date",
                date_col.dtype()
            )));
        }

        for column in data.get_columns() {
            if column.name().as_str() != DATE_COLUMN && column.dtype() != &DataType::Float64 {
                return Err(HindsightError::InvalidData(format!(
                    "price column '{}' has dtype {}, expected f64",
                    column.name(),
                    column.dtype()
                )));
            }
        }

        let dates = read_dates(&data)?;
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(HindsightError::InvalidData(format!(
                "dates must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { data })
    }

    /// Build a table from a date index and one value vector per symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if a column length differs from the index length,
    /// a symbol is repeated or collides with the date column.
    pub fn from_columns(dates: &[Date], columns: Vec<(Symbol, Vec<Option<f64>>)>) -> Result<Self> {
        let days: Vec<i32> = dates.iter().map(|d| days_from_date(*d)).collect();

        let mut seen = HashSet::new();
        let mut frame_columns = Vec::with_capacity(columns.len() + 1);
        frame_columns.push(Column::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?);

        for (symbol, values) in columns {
            if symbol == DATE_COLUMN || !seen.insert(symbol.clone()) {
                return Err(HindsightError::InvalidData(format!(
                    "duplicate or reserved column name '{symbol}'"
                )));
            }
            if values.len() != dates.len() {
                return Err(HindsightError::InvalidData(format!(
                    "column '{symbol}' has {} values for {} dates",
                    values.len(),
                    dates.len()
                )));
            }
            frame_columns.push(Column::new(symbol.as_str().into(), values));
        }

        Self::new(DataFrame::new(frame_columns)?)
    }

    /// Build a table from per-symbol series, aligning them on the union of
    /// their dates.
    ///
    /// # Errors
    ///
    /// Returns an error if the same symbol appears twice.
    pub fn from_series(series: &[PriceSeries]) -> Result<Self> {
        let dates: Vec<Date> = series
            .iter()
            .flat_map(|s| s.points().iter().map(|(d, _)| *d))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let position: HashMap<Date, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let columns = series
            .iter()
            .map(|s| {
                let mut values = vec![None; dates.len()];
                for (date, price) in s.points() {
                    values[position[date]] = Some(*price);
                }
                (s.symbol().to_string(), values)
            })
            .collect();

        Self::from_columns(&dates, columns)
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Symbols (price columns) in column order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|s| s != DATE_COLUMN)
            .collect()
    }

    /// Whether the table carries a column for `symbol`.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        symbol != DATE_COLUMN
            && self
                .data
                .get_column_names()
                .iter()
                .any(|s| s.as_str() == symbol)
    }

    /// The date index.
    ///
    /// # Errors
    ///
    /// Returns an error if the date column cannot be read.
    pub fn dates(&self) -> Result<Vec<Date>> {
        read_dates(&self.data)
    }

    /// Earliest date in the table.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InsufficientData`] if the table is empty.
    pub fn first_date(&self) -> Result<Date> {
        self.dates()?
            .first()
            .copied()
            .ok_or_else(|| HindsightError::InsufficientData("price table is empty".to_string()))
    }

    /// Latest date in the table, the anchor of every lookback window.
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::InsufficientData`] if the table is empty.
    pub fn last_date(&self) -> Result<Date> {
        self.dates()?
            .last()
            .copied()
            .ok_or_else(|| HindsightError::InsufficientData("price table is empty".to_string()))
    }

    /// Raw column values for `symbol`, aligned with [`Self::dates`].
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::SymbolNotFound`] if the column is absent.
    pub fn column_values(&self, symbol: &str) -> Result<Vec<Option<f64>>> {
        if !self.has_symbol(symbol) {
            return Err(HindsightError::SymbolNotFound(symbol.to_string()));
        }
        let values = self
            .data
            .column(symbol)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();
        Ok(values)
    }

    /// The gap-free series of `symbol` (null cells dropped).
    ///
    /// # Errors
    ///
    /// Returns [`HindsightError::SymbolNotFound`] if the column is absent.
    pub fn series(&self, symbol: &str) -> Result<PriceSeries> {
        let dates = self.dates()?;
        let values = self.column_values(symbol)?;
        let points = dates
            .into_iter()
            .zip(values)
            .filter_map(|(date, value)| value.map(|v| (date, v)));
        Ok(PriceSeries::new(symbol, points))
    }

    /// Rows with `start <= date <= end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying filter fails.
    pub fn slice(&self, start: Date, end: Date) -> Result<Self> {
        let mask = self
            .dates()?
            .into_iter()
            .map(|d| d >= start && d <= end)
            .collect::<BooleanChunked>();
        let data = self.data.filter(&mask)?;
        Ok(Self { data })
    }
}

fn read_dates(data: &DataFrame) -> Result<Vec<Date>> {
    let column = data
        .column(DATE_COLUMN)
        .map_err(|_| HindsightError::MissingColumn(DATE_COLUMN.to_string()))?;

    column
        .as_materialized_series()
        .date()?
        .into_iter()
        .map(|d: Option<i32>| {
            d.and_then(date_from_days).ok_or_else(|| {
                HindsightError::InvalidData("date column contains null or out-of-range values".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_table() -> PriceTable {
        let aapl = PriceSeries::new(
            "AAPL",
            [(d(2024, 1, 2), 185.0), (d(2024, 1, 3), 184.0), (d(2024, 1, 4), 181.0)],
        );
        let tsm = PriceSeries::new("TSM", [(d(2024, 1, 2), 98.0), (d(2024, 1, 4), 101.0)]);
        PriceTable::from_series(&[aapl, tsm]).unwrap()
    }

    #[test]
    fn test_epoch_conversion() {
        assert_eq!(days_from_date(d(1970, 1, 1)), 0);
        assert_eq!(date_from_days(0), Some(d(1970, 1, 1)));
        assert_eq!(date_from_days(days_from_date(d(2024, 6, 1))), Some(d(2024, 6, 1)));
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(d(2014, 6, 1), d(2024, 6, 1)).unwrap();
        assert!(range.contains(d(2014, 6, 1)));
        assert!(!range.contains(d(2024, 6, 1)));
        assert!(DateRange::new(d(2024, 6, 1), d(2024, 6, 1)).is_err());
    }

    #[test]
    fn test_listing_label() {
        assert_eq!(Listing::new("TSM", "TSMC").label(), "TSMC (TSM)");
        assert_eq!(Listing::new("^GSPC", "S&P 500").label(), "S&P 500 (^GSPC)");
    }

    #[test]
    fn test_universe() {
        let universe = Universe::new(
            vec![Listing::new("TSM", "TSMC"), Listing::new("AAPL", "Apple")],
            Some(Listing::new("^GSPC", "S&P 500")),
        )
        .unwrap();

        assert_eq!(universe.symbols(), vec!["TSM", "AAPL", "^GSPC"]);
        assert_eq!(universe.label("AAPL"), "Apple (AAPL)");
        assert_eq!(universe.label("MSFT"), "MSFT");
        assert!(universe.is_index("^GSPC"));
        assert!(!universe.is_index("TSM"));
    }

    #[test]
    fn test_universe_rejects_duplicates() {
        let result = Universe::new(
            vec![Listing::new("TSM", "TSMC"), Listing::new("TSM", "Again")],
            None,
        );
        assert!(matches!(result, Err(HindsightError::InvalidData(_))));
        assert!(Universe::new(vec![], None).is_err());
    }

    #[test]
    fn test_series_sorts_and_drops_non_finite() {
        let series = PriceSeries::new(
            "NKE",
            [(d(2024, 1, 3), 2.0), (d(2024, 1, 2), 1.0), (d(2024, 1, 4), f64::NAN)],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.first(), Some((d(2024, 1, 2), 1.0)));
        assert_eq!(series.last(), Some((d(2024, 1, 3), 2.0)));
    }

    #[test]
    fn test_table_from_series_aligns_dates() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.symbols(), vec!["AAPL", "TSM"]);
        assert_eq!(
            table.column_values("TSM").unwrap(),
            vec![Some(98.0), None, Some(101.0)]
        );
        assert_eq!(table.first_date().unwrap(), d(2024, 1, 2));
        assert_eq!(table.last_date().unwrap(), d(2024, 1, 4));
    }

    #[test]
    fn test_table_series_drops_missing() {
        let table = sample_table();
        let tsm = table.series("TSM").unwrap();
        assert_eq!(tsm.points(), &[(d(2024, 1, 2), 98.0), (d(2024, 1, 4), 101.0)]);
        assert!(matches!(
            table.series("MSFT"),
            Err(HindsightError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_table_slice_inclusive() {
        let table = sample_table();
        let sliced = table.slice(d(2024, 1, 3), d(2024, 1, 4)).unwrap();
        assert_eq!(sliced.dates().unwrap(), vec![d(2024, 1, 3), d(2024, 1, 4)]);
        assert_eq!(sliced.symbols(), table.symbols());
    }

    #[test]
    fn test_table_rejects_mismatched_lengths() {
        let result = PriceTable::from_columns(
            &[d(2024, 1, 2)],
            vec![("AAPL".to_string(), vec![Some(1.0), Some(2.0)])],
        );
        assert!(matches!(result, Err(HindsightError::InvalidData(_))));
    }

    #[test]
    fn test_table_rejects_missing_date_column() {
        let df = df! { "AAPL" => &[1.0, 2.0] }.unwrap();
        assert!(matches!(
            PriceTable::new(df),
            Err(HindsightError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::from_series(&[]).unwrap();
        assert!(table.is_empty());
        assert!(matches!(
            table.last_date(),
            Err(HindsightError::InsufficientData(_))
        ));
    }
}
