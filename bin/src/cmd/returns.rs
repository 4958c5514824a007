//! Returns command implementation.

use crate::{AnalysisArgs, OutputFormat, cmd};
use anyhow::Result;
use hindsight_eval::{PeriodAnalysis, analyze_periods};
use hindsight_report::{export_period, format_period};
use serde_json::json;

/// Compute, export and print the return and CAGR reports of every window.
pub(crate) async fn report_returns(args: &AnalysisArgs, format: OutputFormat) -> Result<()> {
    let cmd::Prepared {
        config,
        universe,
        table,
    } = cmd::prepare(args).await?;

    let periods = analyze_periods(&table, &universe, &config.windows)?;
    for period in &periods {
        export_period(&config.output_dir, period)?;
    }

    match format {
        OutputFormat::Text => {
            cmd::banner("Returns");
            print_periods(&periods);
        }
        OutputFormat::Json => {
            let out: Vec<_> = periods.iter().map(period_json).collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

pub(crate) fn print_periods(periods: &[PeriodAnalysis]) {
    for period in periods {
        println!("{}", format_period(period));
    }
}

fn period_json(period: &PeriodAnalysis) -> serde_json::Value {
    json!({
        "window": period.window,
        "start": period.start,
        "end": period.end,
        "returns": period.returns,
        "total_return": period.total_return,
        "cagr": period.cagr,
    })
}
