//! Financial Modeling Prep price provider.

use crate::{Result, error::DataError, types::HistoricalPrice};
use hindsight_traits::{DateRange, PriceProvider, PriceSeries, PriceTable, Symbol};
use reqwest::Client;
use std::env;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| DataError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(DataError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - Start date (YYYY-MM-DD), inclusive
    /// * `to` - End date (YYYY-MM-DD), inclusive
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = String::new();
        if let Some(f) = from {
            params.push_str(&format!("&from={f}"));
        }
        if let Some(t) = to {
            params.push_str(&format!("&to={t}"));
        }

        let endpoint = format!(
            "historical-price-eod/full?symbol={}{}",
            symbol.to_uppercase(),
            params
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get the closing price series of `symbol` over `range`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::NoData`] if the API has no bars inside the range.
    pub async fn price_series(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        // FMP treats `to` as inclusive
        let last = range.end.pred_opt().unwrap_or(range.end);
        let from = range.start.format("%Y-%m-%d").to_string();
        let to = last.format("%Y-%m-%d").to_string();

        let prices = self.historical_prices(symbol, Some(&from), Some(&to)).await?;
        let points = prices.iter().filter_map(|p| {
            p.parsed_date()
                .filter(|d| range.contains(*d))
                .map(|d| (d, p.closing_price()))
        });

        let series = PriceSeries::new(symbol, points);
        if series.is_empty() {
            return Err(DataError::NoData(format!("{symbol} between {from} and {to}")));
        }
        Ok(series)
    }
}

impl PriceProvider for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch(
        &self,
        symbols: &[Symbol],
        range: DateRange,
    ) -> hindsight_traits::Result<PriceTable> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            tracing::debug!(%symbol, "requesting FMP end-of-day prices");
            let s = self.price_series(symbol, range).await?;
            tracing::debug!(%symbol, rows = s.len(), "received prices");
            series.push(s);
        }
        PriceTable::from_series(&series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("quote?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/quote?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            client.url("historical-price-eod/full?symbol=AAPL&from=2014-06-01"),
            "https://financialmodelingprep.com/stable/historical-price-eod/full?symbol=AAPL&from=2014-06-01&apikey=test_key"
        );
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(FmpClient::new("k").name(), "fmp");
    }
}
