//! Chart command implementation.

use crate::{AnalysisArgs, cmd};
use anyhow::Result;
use hindsight_eval::Window;
use hindsight_report::{ChartConfig, render_chart};
use hindsight_traits::{PriceTable, Universe};
use std::path::Path;

/// Render the normalized chart of every window.
pub(crate) async fn render_charts(args: &AnalysisArgs) -> Result<()> {
    let cmd::Prepared {
        config,
        universe,
        table,
    } = cmd::prepare(args).await?;

    for window in &config.windows {
        let windowed = window.apply(&table)?;
        render_window(&config.output_dir, &windowed, &universe, window)?;
    }
    Ok(())
}

pub(crate) fn render_window(
    dir: &Path,
    windowed: &PriceTable,
    universe: &Universe,
    window: &Window,
) -> Result<()> {
    let path = render_chart(dir, windowed, universe, window, &ChartConfig::default())?;
    println!("Chart for {} saved to {}", window.label, path.display());
    Ok(())
}
