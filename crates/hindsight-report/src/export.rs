//! CSV export.
//!
//! Every file is rewritten in full on each run. Values are written with two
//! decimals, so the same prices always produce the same bytes.

use crate::error::Result;
use hindsight_eval::{BestEntrySummary, Metric, PeriodAnalysis, Report};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name of the best-entry table.
pub const BEST_ENTRY_FILE: &str = "best_entry.csv";

/// Write a ranked report as `Stock,<Metric> (%)` rows.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn write_report(dir: &Path, file_name: &str, report: &Report) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);

    let mut writer = csv::Writer::from_path(&path)?;
    let header = format!("{} (%)", report.metric());
    writer.write_record(["Stock", header.as_str()])?;
    for row in report.rows() {
        writer.write_record([row.label.as_str(), format!("{:.2}", row.value).as_str()])?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = report.len(), "wrote report");
    Ok(path)
}

/// Write both reports of a period, returns first.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn export_period(dir: &Path, analysis: &PeriodAnalysis) -> Result<Vec<PathBuf>> {
    Metric::ALL
        .into_iter()
        .map(|metric| {
            let file_name = analysis.window.report_file_name(metric);
            write_report(dir, &file_name, analysis.report(metric))
        })
        .collect()
}

/// Write one best-entry row per ticker, in universe order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn write_best_entries(dir: &Path, summary: &BestEntrySummary) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(BEST_ENTRY_FILE);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record([
        "Stock",
        "Best Entry Date",
        "Buy Price",
        "Final Value",
        "Total Profit",
        "Return Rate (%)",
    ])?;
    for r in &summary.results {
        writer.write_record([
            r.label.clone(),
            r.buy_date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", r.buy_price),
            format!("{:.2}", r.final_value),
            format!("{:.2}", r.profit),
            format!("{:.2}", r.return_rate),
        ])?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = summary.results.len(), "wrote best entries");
    Ok(path)
}
