//! CLI subcommand modules.
//!
//! This module contains the implementations for all hindsight CLI subcommands.

pub(crate) mod chart;
pub(crate) mod entry;
pub(crate) mod returns;
pub(crate) mod run;

use crate::{AnalysisArgs, config, data};
use anyhow::Result;
use hindsight_eval::AnalysisConfig;
use hindsight_traits::{PriceTable, Universe};

/// Everything a subcommand needs before it starts computing.
pub(crate) struct Prepared {
    pub(crate) config: AnalysisConfig,
    pub(crate) universe: Universe,
    pub(crate) table: PriceTable,
}

/// Resolve the configuration and fetch prices for its universe.
pub(crate) async fn prepare(args: &AnalysisArgs) -> Result<Prepared> {
    let config = config::load_config(args)?;
    let universe = config.universe()?;
    let table = data::load_prices(args.provider, args.input.as_deref(), &config).await?;
    Ok(Prepared {
        config,
        universe,
        table,
    })
}

/// Print a boxed section heading.
pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}
