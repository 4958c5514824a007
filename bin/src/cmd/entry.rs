//! Best-entry command implementation.

use crate::{AnalysisArgs, OutputFormat, cmd};
use anyhow::Result;
use hindsight_eval::best_entries;
use hindsight_report::{format_entries, write_best_entries};

/// Find, export and print the best lump-sum entry of every equity.
pub(crate) async fn find_best_entries(args: &AnalysisArgs, format: OutputFormat) -> Result<()> {
    let cmd::Prepared {
        config,
        universe,
        table,
    } = cmd::prepare(args).await?;

    let summary = best_entries(&table, &universe, config.capital)?;
    write_best_entries(&config.output_dir, &summary)?;

    match format {
        OutputFormat::Text => {
            cmd::banner("Best Entry (All-In Once)");
            print!("{}", format_entries(&summary));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
