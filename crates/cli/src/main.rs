//! # rollout
//!
//! Command-line orchestrator: scales datasets, rolls a model forward over a
//! seed and restores the predictions to physical units.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use data_core::SaveFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::DatasetPair;
use config::RunConfig;

#[derive(Parser)]
#[command(name = "rollout")]
#[command(about = "Reversible feature scaling and autoregressive forecasting", long_about = None)]
struct Cli {
    /// Run configuration (JSON)
    #[arg(short, long, global = true, default_value = "rollout.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PairArgs {
    /// Input dataset (CSV or NPY)
    #[arg(long)]
    data_in: PathBuf,

    /// Output dataset (CSV or NPY)
    #[arg(long)]
    data_out: Option<PathBuf>,

    /// Directory the transformed datasets are written to
    #[arg(short, long)]
    dest: PathBuf,

    /// Output encoding (ascii, npy)
    #[arg(short, long, default_value = "ascii")]
    format: SaveFormat,
}

impl From<PairArgs> for DatasetPair {
    fn from(args: PairArgs) -> Self {
        Self {
            data_in: args.data_in,
            data_out: args.data_out,
            dest: args.dest,
            format: args.format,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fit scale factors, persist them and write the scaled datasets
    Scale(PairArgs),

    /// Restore scaled datasets with the persisted factors
    Invert(PairArgs),

    /// Roll the configured model forward over the seed
    Forecast,

    /// Scale the seed, forecast and restore the predictions
    Run,
}

fn execute(cli: Cli) -> Result<()> {
    let config = RunConfig::load(&cli.config)?;
    match cli.command {
        Commands::Scale(args) => commands::run_scale(config.scaling()?, &args.into()),
        Commands::Invert(args) => commands::run_invert(config.scaling()?, &args.into()),
        Commands::Forecast => commands::run_forecast(config.forecast()?).map(|_| ()),
        Commands::Run => match config.scaling {
            Some(ref scaling) => commands::run_pipeline(scaling, config.forecast()?).map(|_| ()),
            None => {
                tracing::info!("no scaling section, forecasting unscaled");
                commands::run_forecast(config.forecast()?).map(|_| ())
            }
        },
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
