//! Full pipeline command implementation.

use crate::{
    AnalysisArgs, cmd,
    cmd::{chart::render_window, returns::print_periods},
};
use anyhow::Result;
use hindsight_eval::{analyze_periods, best_entries};
use hindsight_report::{export_period, format_entries, write_best_entries};

/// Run every stage: reports and CSVs per window, charts, best entries.
pub(crate) async fn run_all(args: &AnalysisArgs) -> Result<()> {
    let cmd::Prepared {
        config,
        universe,
        table,
    } = cmd::prepare(args).await?;
    let dir = &config.output_dir;

    let periods = analyze_periods(&table, &universe, &config.windows)?;

    cmd::banner("Returns");
    for period in &periods {
        export_period(dir, period)?;
    }
    print_periods(&periods);

    if config.charts {
        cmd::banner("Charts");
        for period in &periods {
            render_window(dir, &period.table, &universe, &period.window)?;
        }
    }

    let summary = best_entries(&table, &universe, config.capital)?;
    write_best_entries(dir, &summary)?;
    cmd::banner("Best Entry (All-In Once)");
    print!("{}", format_entries(&summary));

    Ok(())
}
