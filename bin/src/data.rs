//! Data loading utilities for the hindsight CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use hindsight_data::{CsvPriceProvider, FmpClient, YahooClient};
use hindsight_eval::AnalysisConfig;
use hindsight_traits::{HindsightError, PriceProvider, PriceTable};
use std::path::Path;

/// Where daily closes come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProviderKind {
    /// Yahoo Finance chart API
    #[default]
    Yahoo,
    /// Financial Modeling Prep (needs FMP_API_KEY)
    Fmp,
    /// Local CSV file (needs --input)
    Csv,
}

/// Load the price table for every listing in the configured universe.
pub(crate) async fn load_prices(
    kind: ProviderKind,
    input: Option<&Path>,
    config: &AnalysisConfig,
) -> Result<PriceTable> {
    let symbols = config.universe()?.symbols();
    let range = config.range()?;

    tracing::info!(
        symbols = %symbols.join(","),
        start = %range.start,
        end = %range.end,
        "fetching prices"
    );

    let table = match kind {
        ProviderKind::Yahoo => fetch(&YahooClient::new()?, &symbols, range).await?,
        ProviderKind::Fmp => fetch(&FmpClient::from_env()?, &symbols, range).await?,
        ProviderKind::Csv => {
            let path = input.context("the csv provider needs --input <FILE>")?;
            fetch(&CsvPriceProvider::new(path), &symbols, range).await?
        }
    };

    tracing::info!(
        rows = table.len(),
        first = %table.first_date()?,
        last = %table.last_date()?,
        "loaded price table"
    );
    Ok(table)
}

async fn fetch<P: PriceProvider>(
    provider: &P,
    symbols: &[String],
    range: hindsight_traits::DateRange,
) -> Result<PriceTable, HindsightError> {
    tracing::debug!(provider = provider.name(), "using provider");
    provider.fetch(symbols, range).await
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, HindsightError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| HindsightError::InvalidDate(format!("Invalid date format: {}", e)))
}
