//! Market data providers for hindsight.
//!
//! This crate implements [`hindsight_traits::PriceProvider`] for three
//! sources of daily closing prices:
//!
//! - [`YahooClient`]: the Yahoo Finance chart API (no key required, serves
//!   indices such as `^GSPC`);
//! - [`FmpClient`]: the [Financial Modeling Prep](https://financialmodelingprep.com/)
//!   end-of-day API;
//! - [`CsvPriceProvider`]: a local CSV file.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hindsight_data::YahooClient;
//! use hindsight_traits::{DateRange, PriceProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new()?;
//!     let range = DateRange::new(start, end)?;
//!     let table = client.fetch(&["AAPL".into(), "^GSPC".into()], range).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! The FMP provider reads `FMP_API_KEY` from the environment or a `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod error;
mod file;
mod fmp;
mod types;
mod yahoo;

pub use error::DataError;
pub use file::CsvPriceProvider;
pub use fmp::FmpClient;
pub use types::*;
pub use yahoo::YahooClient;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, DataError>;
