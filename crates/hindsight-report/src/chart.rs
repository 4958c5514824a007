//! Normalized price charts.
//!
//! Each chart plots every listing of the universe rebased to 100 on the first
//! day of the window. Dates are plotted as `f64` days since the Unix epoch,
//! which keeps the coordinate system a plain float range.

use crate::error::{ReportError, Result};
use chrono::Datelike;
use hindsight_eval::{Window, normalize};
use hindsight_traits::{PriceTable, Universe, date_from_days, days_from_date};
use plotters::prelude::*;
use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

/// Chart rendering settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color.
    pub background_color: RGBColor,
    /// Line width of each price series.
    pub line_width: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            background_color: WHITE,
            line_width: 2,
        }
    }
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend label.
    pub label: String,
    /// `(days since epoch, normalized price)` points.
    pub points: Vec<(f64, f64)>,
}

/// Normalize `table` and turn each listing into a chart line, in universe
/// order.
///
/// # Errors
///
/// Returns an error if a listing is missing from the table or cannot be
/// normalized.
pub fn prepare_series(table: &PriceTable, universe: &Universe) -> Result<Vec<ChartSeries>> {
    let normalized = normalize(table)?;
    universe
        .listings()
        .map(|listing| -> Result<ChartSeries> {
            let series = normalized.series(&listing.ticker)?;
            let points = series
                .points()
                .iter()
                .map(|&(date, price)| (f64::from(days_from_date(date)), price))
                .collect();
            Ok(ChartSeries {
                label: listing.label(),
                points,
            })
        })
        .collect()
}

/// Render the chart of `table` (already sliced to `window`) into `dir`.
///
/// The file name and title come from the window.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if the table has fewer than two rows or
/// drawing fails, and other variants for table or filesystem errors.
pub fn render_chart(
    dir: &Path,
    table: &PriceTable,
    universe: &Universe,
    window: &Window,
    config: &ChartConfig,
) -> Result<PathBuf> {
    if table.len() < 2 {
        return Err(ReportError::Chart(format!(
            "{} needs at least 2 rows to plot, got {}",
            window.label,
            table.len()
        )));
    }

    let first = table.first_date()?;
    let last = table.last_date()?;
    let series = prepare_series(table, universe)?;
    let title = window.chart_title(first, last);

    fs::create_dir_all(dir)?;
    let path = dir.join(window.chart_file_name());

    let x_range = f64::from(days_from_date(first))..f64::from(days_from_date(last));
    let y_range = value_range(&series);
    let monthly = last.year() - first.year() <= 2;

    {
        let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
        draw(&root, config, &title, &series, x_range, y_range, monthly)
            .and_then(|()| root.present())
            .map_err(|e| ReportError::Chart(e.to_string()))?;
    }

    tracing::info!(path = %path.display(), lines = series.len(), "rendered chart");
    Ok(path)
}

/// Y range covering every point with 5% padding.
fn value_range(series: &[ChartSeries]) -> Range<f64> {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..200.0;
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    (lo - pad)..(hi + pad)
}

fn axis_label(days: f64, monthly: bool) -> String {
    date_from_days(days.round() as i32).map_or_else(String::new, |date| {
        if monthly {
            date.format("%Y-%m").to_string()
        } else {
            date.year().to_string()
        }
    })
}

fn draw<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    config: &ChartConfig,
    title: &str,
    series: &[ChartSeries],
    x_range: Range<f64>,
    y_range: Range<f64>,
    monthly: bool,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    area.fill(&config.background_color)?;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Normalized Price (Start = 100)")
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|x| axis_label(*x, monthly))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let width = config.line_width;
        chart
            .draw_series(LineSeries::new(
                s.points.iter().copied(),
                color.stroke_width(width),
            ))?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
