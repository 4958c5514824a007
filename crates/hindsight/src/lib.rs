#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hindsight/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Quick Start
//!
//! ```ignore
//! use hindsight::{AnalysisConfig, PriceProvider};
//! use hindsight::data::YahooClient;
//! use hindsight::eval::{analyze_periods, best_entries};
//! use hindsight::report::{export_period, format_entries};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AnalysisConfig::default();
//! let universe = config.universe()?;
//!
//! let provider = YahooClient::new()?;
//! let table = provider.fetch(&universe.symbols(), config.range()?).await?;
//!
//! for period in analyze_periods(&table, &universe, &config.windows)? {
//!     export_period(&config.output_dir, &period)?;
//! }
//!
//! let summary = best_entries(&table, &universe, config.capital)?;
//! print!("{}", format_entries(&summary));
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! 1. A **provider** fetches daily closes for the universe into a `PriceTable`
//! 2. Each **window** slices the table and yields ranked return and CAGR reports
//! 3. The **report** layer writes CSVs, prints tables and renders charts
//! 4. The **best-entry** search scans every past buy date per equity

/// Version information for the hindsight crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types, the error type and the provider trait.
pub mod traits {
    pub use hindsight_traits::*;
}

pub use hindsight_traits::{
    Date, DateRange, HindsightError, Listing, PriceProvider, PriceSeries, PriceTable, Result,
    Symbol, Universe,
};

// ============================================================================
// Market Data
// ============================================================================

/// Price providers.
///
/// - **YahooClient**: Yahoo Finance chart API, no key required
/// - **FmpClient**: Financial Modeling Prep, reads `FMP_API_KEY`
/// - **CsvPriceProvider**: local CSV files in wide or long layout
pub mod data {
    pub use hindsight_data::*;
}

// ============================================================================
// Analysis
// ============================================================================

/// Return, CAGR, normalization and best-entry analysis.
pub mod eval {
    pub use hindsight_eval::*;
}

pub use hindsight_eval::{AnalysisConfig, Window, WindowScope};

// ============================================================================
// Output
// ============================================================================

/// CSV export, console formatting and charts.
pub mod report {
    pub use hindsight_report::*;
}
