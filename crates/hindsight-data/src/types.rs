//! Data types for provider responses.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Historical daily bar from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Adjusted close.
    #[serde(rename = "adjClose", default)]
    pub adj_close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Adjusted close when the endpoint provides one, raw close otherwise.
    #[must_use]
    pub fn closing_price(&self) -> f64 {
        if self.adj_close > 0.0 {
            self.adj_close
        } else {
            self.close
        }
    }
}

/// Top-level Yahoo Finance chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    /// Chart payload.
    pub chart: Chart,
}

/// Chart payload: either a result list or an error.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    /// One entry per requested symbol.
    pub result: Option<Vec<ChartResult>>,
    /// Error reported by Yahoo.
    pub error: Option<ChartError>,
}

/// Error object returned by the chart endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    /// Error code, e.g. `"Not Found"`.
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Price history for one symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    /// Instrument metadata.
    pub meta: ChartMeta,
    /// Bar timestamps (seconds since the Unix epoch).
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Price indicators aligned with `timestamp`.
    pub indicators: Indicators,
}

/// Instrument metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Ticker symbol.
    pub symbol: String,
    /// Quote currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange offset from GMT in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
}

/// Indicator arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    /// Raw OHLCV quotes.
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    /// Split and dividend adjusted closes.
    #[serde(default)]
    pub adjclose: Vec<AdjCloseIndicator>,
}

/// Raw quote arrays; only the close is used.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteIndicator {
    /// Raw closes, null on days without a quote.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Adjusted close array.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjCloseIndicator {
    /// Adjusted closes, null on days without a quote.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResult {
    /// Daily `(date, close)` points, preferring adjusted closes.
    ///
    /// Timestamps are shifted by the exchange offset before taking the date
    /// so that bars keep their local trading day. Null closes are skipped.
    #[must_use]
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        let closes: &[Option<f64>] = match self.indicators.adjclose.first() {
            Some(adj) if !adj.adjclose.is_empty() => &adj.adjclose,
            _ => self
                .indicators
                .quote
                .first()
                .map(|q| q.close.as_slice())
                .unwrap_or_default(),
        };

        self.timestamp
            .iter()
            .zip(closes)
            .filter_map(|(ts, close)| {
                let date = DateTime::from_timestamp(ts + self.meta.gmtoffset, 0)?.date_naive();
                close.map(|c| (date, c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_JSON: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "currency": "USD", "gmtoffset": -14400},
                "timestamp": [1717162200, 1717421400, 1717507800],
                "indicators": {
                    "quote": [{"close": [192.25, 194.03, null]}],
                    "adjclose": [{"adjclose": [191.5, 193.3, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_chart_closes_prefer_adjusted() {
        let response: ChartResponse = serde_json::from_str(CHART_JSON).unwrap();
        let result = &response.chart.result.unwrap()[0];
        let closes = result.closes();

        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0], (NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), 191.5));
        assert_eq!(closes[1], (NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 193.3));
    }

    #[test]
    fn test_chart_closes_fall_back_to_raw() {
        let json = r#"{
            "meta": {"symbol": "^GSPC", "gmtoffset": -14400},
            "timestamp": [1717162200],
            "indicators": {"quote": [{"close": [5277.51]}]}
        }"#;
        let result: ChartResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.closes()[0].1, 5277.51);
    }

    #[test]
    fn test_chart_error_payload() {
        let json = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.result.is_none());
        assert_eq!(response.chart.error.unwrap().code, "Not Found");
    }

    #[test]
    fn test_historical_price_closing_price() {
        let json = r#"[
            {"symbol": "NKE", "date": "2024-05-31", "open": 93.1, "high": 95.0, "low": 92.8, "close": 94.99, "volume": 1000},
            {"date": "2024-05-30", "open": 1.0, "high": 1.0, "low": 1.0, "close": 93.0, "adjClose": 92.5}
        ]"#;
        let prices: Vec<HistoricalPrice> = serde_json::from_str(json).unwrap();
        assert_eq!(prices[0].closing_price(), 94.99);
        assert_eq!(prices[1].closing_price(), 92.5);
        assert_eq!(
            prices[0].parsed_date(),
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );
    }
}
