//! Yahoo Finance price provider.

use crate::{
    Result,
    error::DataError,
    types::{ChartResponse, ChartResult},
};
use chrono::NaiveDate;
use hindsight_traits::{DateRange, PriceProvider, PriceSeries, PriceTable, Symbol};
use reqwest::Client;

/// Base URL for the Yahoo Finance chart API.
const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) hindsight/0.1";

/// Yahoo Finance chart API client.
///
/// Needs no API key and serves indices such as `^GSPC` alongside equities.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a new Yahoo client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Create a client against a different chart endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the daily chart URL for `symbol` over `range`.
    fn url(&self, symbol: &str, range: DateRange) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url,
            encode_symbol(symbol),
            unix_seconds(range.start),
            unix_seconds(range.end),
        )
    }

    /// Fetch the raw chart payload for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Yahoo reports an error.
    pub async fn chart(&self, symbol: &str, range: DateRange) -> Result<ChartResult> {
        let response = self.client.get(self.url(symbol, range)).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded);
        }
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        parse_chart(symbol, &text)
    }

    /// Get the closing price series of `symbol` over `range`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NoData`] if Yahoo has no bars inside the range.
    pub async fn price_series(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        let chart = self.chart(symbol, range).await?;
        let points = chart
            .closes()
            .into_iter()
            .filter(|(d, _)| range.contains(*d));

        let series = PriceSeries::new(symbol, points);
        if series.is_empty() {
            return Err(DataError::NoData(format!(
                "{symbol} between {} and {}",
                range.start, range.end
            )));
        }
        Ok(series)
    }
}

impl PriceProvider for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch(
        &self,
        symbols: &[Symbol],
        range: DateRange,
    ) -> hindsight_traits::Result<PriceTable> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            tracing::debug!(%symbol, "requesting Yahoo daily chart");
            let s = self.price_series(symbol, range).await?;
            tracing::debug!(%symbol, rows = s.len(), "received prices");
            series.push(s);
        }
        PriceTable::from_series(&series)
    }
}

/// Parse a chart response body, surfacing Yahoo's error object.
fn parse_chart(symbol: &str, body: &str) -> Result<ChartResult> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(DataError::Api(format!(
            "{symbol}: {} ({})",
            err.code, err.description
        )));
    }

    response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::NoData(symbol.to_string()))
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// Percent-encode the characters Yahoo index symbols use.
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}
