#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hindsight/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The version of the hindsight-report crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod chart;
pub mod console;
pub mod error;
pub mod export;

pub use chart::{ChartConfig, ChartSeries, prepare_series, render_chart};
pub use console::{format_entries, format_period, format_report, format_thousands};
pub use error::{ReportError, Result};
pub use export::{BEST_ENTRY_FILE, export_period, write_best_entries, write_report};
