//! Local CSV price provider for offline and reproducible runs.
//!
//! Two layouts are accepted:
//!
//! - wide: `date,TSM,AAPL,^GSPC` with one column per symbol, empty cells for
//!   missing quotes (the layout pandas writes for a close-price frame);
//! - long: `date,ticker,close` with one row per symbol and date.

use crate::{Result, error::DataError};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use hindsight_traits::{Date, DateRange, PriceProvider, PriceSeries, PriceTable, Symbol};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Reads closing prices from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    /// Create a provider reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every series in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a cell cannot be parsed.
    pub fn load(&self) -> Result<Vec<PriceSeries>> {
        let file = std::fs::File::open(&self.path).map_err(csv::Error::from)?;
        read_series(file)
    }
}

impl PriceProvider for CsvPriceProvider {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch(
        &self,
        symbols: &[Symbol],
        range: DateRange,
    ) -> hindsight_traits::Result<PriceTable> {
        tracing::debug!(path = %self.path.display(), "loading prices from CSV");
        let mut all: HashMap<String, PriceSeries> = self
            .load()?
            .into_iter()
            .map(|s| (s.symbol().to_string(), s))
            .collect();

        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let loaded = all
                .remove(symbol)
                .ok_or_else(|| DataError::SymbolNotFound(symbol.clone()))?;
            let points = loaded
                .points()
                .iter()
                .filter(|(d, _)| range.contains(*d))
                .copied();
            let s = PriceSeries::new(symbol.as_str(), points);
            if s.is_empty() {
                return Err(DataError::NoData(format!(
                    "{symbol} between {} and {} in {}",
                    range.start,
                    range.end,
                    self.path.display()
                ))
                .into());
            }
            series.push(s);
        }
        PriceTable::from_series(&series)
    }
}

/// Parse CSV content in either supported layout.
fn read_series<R: io::Read>(reader: R) -> Result<Vec<PriceSeries>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let find = |names: &[&str]| lower.iter().position(|h| names.contains(&h.as_str()));
    let date_idx = find(&["date"]).ok_or_else(|| DataError::MissingColumn("date".to_string()))?;

    match (find(&["ticker", "symbol"]), find(&["close"])) {
        (Some(ticker_idx), Some(close_idx)) => read_long(&mut rdr, date_idx, ticker_idx, close_idx),
        _ => read_wide(&mut rdr, &headers, date_idx),
    }
}

fn read_wide<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    headers: &[String],
    date_idx: usize,
) -> Result<Vec<PriceSeries>> {
    let mut columns: Vec<(String, Vec<(Date, f64)>)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .map(|(_, h)| (h.clone(), Vec::new()))
        .collect();

    for record in rdr.records() {
        let record = record?;
        let date = parse_date(record.get(date_idx).unwrap_or_default())?;
        let cells = record.iter().enumerate().filter(|(i, _)| *i != date_idx);
        for ((_, cell), (_, points)) in cells.zip(columns.iter_mut()) {
            if let Some(price) = parse_price(cell)? {
                points.push((date, price));
            }
        }
    }

    Ok(columns
        .into_iter()
        .map(|(symbol, points)| PriceSeries::new(symbol, points))
        .collect())
}

fn read_long<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    date_idx: usize,
    ticker_idx: usize,
    close_idx: usize,
) -> Result<Vec<PriceSeries>> {
    let mut order: Vec<String> = Vec::new();
    let mut by_ticker: HashMap<String, Vec<(Date, f64)>> = HashMap::new();

    for record in rdr.records() {
        let record = record?;
        let date = parse_date(record.get(date_idx).unwrap_or_default())?;
        let ticker = record.get(ticker_idx).unwrap_or_default().to_string();
        let Some(price) = parse_price(record.get(close_idx).unwrap_or_default())? else {
            continue;
        };
        if !by_ticker.contains_key(&ticker) {
            order.push(ticker.clone());
        }
        by_ticker.entry(ticker).or_default().push((date, price));
    }

    Ok(order
        .into_iter()
        .map(|ticker| {
            let points = by_ticker.remove(&ticker).unwrap_or_default();
            PriceSeries::new(ticker, points)
        })
        .collect())
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(cell: &str) -> Result<Date> {
    let day = cell.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| DataError::Parse(format!("invalid date '{cell}': {e}")))
}

/// Empty cells and NaN markers are missing quotes, not errors.
fn parse_price(cell: &str) -> Result<Option<f64>> {
    if cell.is_empty() || matches!(cell.to_lowercase().as_str(), "nan" | "null" | "na") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|e| DataError::Parse(format!("invalid price '{cell}': {e}")))
}
