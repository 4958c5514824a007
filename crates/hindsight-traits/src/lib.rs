#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hindsight/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the hindsight return analyzer.
//!
//! This crate provides the price containers, the symbol universe and the
//! provider abstraction shared by the data, evaluation and report crates.

/// The version of the hindsight-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod provider;
pub mod types;

// Re-exports
pub use error::{HindsightError, Result};
pub use provider::PriceProvider;
pub use types::{
    CE_TO_UNIX_EPOCH_DAYS, DATE_COLUMN, Date, DateRange, Listing, PriceSeries, PriceTable,
    Symbol, Universe, date_from_days, days_from_date,
};
