//! Return and CAGR reports for one lookback window.

use crate::{
    report::{Metric, Report},
    returns::WindowReturn,
    window::Window,
};
use hindsight_traits::{Date, PriceTable, Result, Universe};

/// Everything computed for one window.
#[derive(Debug, Clone)]
pub struct PeriodAnalysis {
    /// The window analysed.
    pub window: Window,
    /// The price rows inside the window.
    pub table: PriceTable,
    /// First date of the windowed table.
    pub start: Date,
    /// Last date of the windowed table.
    pub end: Date,
    /// Per-symbol figures, in universe order and unrounded.
    pub returns: Vec<WindowReturn>,
    /// Total return per label, ranked.
    pub total_return: Report,
    /// CAGR per label, ranked.
    pub cagr: Report,
}

impl PeriodAnalysis {
    /// The report for a metric.
    #[must_use]
    pub const fn report(&self, metric: Metric) -> &Report {
        match metric {
            Metric::TotalReturn => &self.total_return,
            Metric::Cagr => &self.cagr,
        }
    }
}

/// Slice `table` to `window` and compute returns for every listing in
/// `universe`, equities first and the index last.
///
/// # Errors
///
/// Fails if a symbol is absent from the table, has fewer than two prices in
/// the window, or starts or ends at a non-positive price.
pub fn analyze_period(
    table: &PriceTable,
    universe: &Universe,
    window: &Window,
) -> Result<PeriodAnalysis> {
    let windowed = window.apply(table)?;
    let start = windowed.first_date()?;
    let end = windowed.last_date()?;

    let mut returns = Vec::new();
    let mut labelled = Vec::new();
    for listing in universe.listings() {
        let series = windowed.series(&listing.ticker)?;
        let r = WindowReturn::compute(&series, window.years)?;
        labelled.push((listing.label(), r.total_return, r.cagr));
        returns.push(r);
    }

    let total_return = Report::new(
        Metric::TotalReturn,
        labelled.iter().map(|(label, tr, _)| (label.clone(), *tr)),
    );
    let cagr = Report::new(
        Metric::Cagr,
        labelled.into_iter().map(|(label, _, cagr)| (label, cagr)),
    );

    tracing::info!(
        window = %window.label,
        %start,
        %end,
        rows = windowed.len(),
        "analysed period"
    );

    Ok(PeriodAnalysis {
        window: window.clone(),
        table: windowed,
        start,
        end,
        returns,
        total_return,
        cagr,
    })
}

/// Run [`analyze_period`] for every window, in order.
///
/// # Errors
///
/// Stops at the first window that fails.
pub fn analyze_periods(
    table: &PriceTable,
    universe: &Universe,
    windows: &[Window],
) -> Result<Vec<PeriodAnalysis>> {
    windows
        .iter()
        .map(|window| analyze_period(table, universe, window))
        .collect()
}
