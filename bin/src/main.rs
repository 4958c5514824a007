//! Hindsight CLI binary.
//!
//! Fetches daily closes for a set of equities and a market index, then
//! reports returns, CAGR, normalized charts and the best lump-sum entry.

mod cmd;
mod config;
mod data;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, process};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hindsight")]
#[command(about = "Historical return, CAGR and best-entry analysis for equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the whole analysis: reports, CSVs, charts and best entries
    Run {
        #[command(flatten)]
        args: AnalysisArgs,
    },

    /// Compute and export return and CAGR reports for every window
    Returns {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Console output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Render normalized price charts for every window
    Chart {
        #[command(flatten)]
        args: AnalysisArgs,
    },

    /// Find the best single lump-sum entry date per stock
    BestEntry {
        #[command(flatten)]
        args: AnalysisArgs,

        /// Console output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Options shared by every subcommand. Flags override the config file,
/// which overrides the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct AnalysisArgs {
    /// JSON configuration file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Equities as TICKER=Name pairs (e.g. TSM=TSMC,AAPL=Apple)
    #[arg(short, long, value_delimiter = ',')]
    pub(crate) symbols: Vec<String>,

    /// Market index as TICKER=Name, or "none"
    #[arg(long)]
    pub(crate) index: Option<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub(crate) start: Option<String>,

    /// End date (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub(crate) end: Option<String>,

    /// Capital invested per stock by the best-entry search
    #[arg(long)]
    pub(crate) capital: Option<f64>,

    /// Directory for CSV and PNG output
    #[arg(short, long)]
    pub(crate) output_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub(crate) no_charts: bool,

    /// Price source
    #[arg(short, long, value_enum, default_value_t = data::ProviderKind::Yahoo)]
    pub(crate) provider: data::ProviderKind,

    /// CSV file for the csv provider
    #[arg(short, long)]
    pub(crate) input: Option<PathBuf>,
}

/// Console output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { args } => cmd::run::run_all(&args).await?,
        Commands::Returns { args, format } => cmd::returns::report_returns(&args, format).await?,
        Commands::Chart { args } => cmd::chart::render_charts(&args).await?,
        Commands::BestEntry { args, format } => cmd::entry::find_best_entries(&args, format).await?,
    }

    Ok(())
}

/// Log to stderr so stdout carries only the reports. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
