//! Return analysis for hindsight.
//!
//! This crate turns a date-indexed price table into the figures hindsight
//! reports:
//! - Total return and CAGR per symbol over a lookback window
//! - Ranked reports per window
//! - Normalized prices (start = 100) for charting
//! - The best single lump-sum entry date per equity
//!
//! # Example
//!
//! ```rust,ignore
//! use hindsight_eval::{AnalysisConfig, analyze_periods, best_entries};
//!
//! let config = AnalysisConfig::default();
//! let universe = config.universe()?;
//!
//! for period in analyze_periods(&table, &universe, &config.windows)? {
//!     println!("{}: {:?}", period.window.label, period.cagr.rows());
//! }
//!
//! let summary = best_entries(&table, &universe, config.capital)?;
//! println!("{:?}", summary.best());
//! ```

pub mod config;
pub mod entry;
pub mod normalize;
pub mod period;
pub mod report;
pub mod returns;
pub mod window;

// Re-export main types
pub use config::AnalysisConfig;
pub use entry::{BestEntrySummary, EntryResult, best_entries, best_entry};
pub use normalize::{NORMALIZED_BASE, normalize};
pub use period::{PeriodAnalysis, analyze_period, analyze_periods};
pub use report::{Metric, Report, ReportRow};
pub use returns::{WindowReturn, cagr_pct, round2, total_return_pct};
pub use window::{Window, WindowScope, default_windows};
