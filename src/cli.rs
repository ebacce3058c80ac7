use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sojourn transition matrix estimator for per-period category shares.
#[derive(Parser)]
#[command(
    name = "sojourn",
    version,
    about = "Estimate transition probability matrices from per-period category shares"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Estimate a transition probability matrix from a share table.
    Estimate(EstimateArgs),
    /// Print the header and first rows of a share table.
    Preview(PreviewArgs),
}

/// Arguments for the `estimate` subcommand.
#[derive(clap::Args)]
pub struct EstimateArgs {
    /// Path to the input table (overrides `[io].input`).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file or directory (overrides `[io].output`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// State assignment mode: `dominant` or `proportional`.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Treat the last column as a row total and exclude it.
    #[arg(long = "trailing-total")]
    pub trailing_total: bool,

    /// Field delimiter for input and output (`,`, `;`, `tab`, ...).
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Output encoding: `csv` or `json`.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Fixed number of decimals in written and printed values.
    #[arg(short, long)]
    pub precision: Option<usize>,
}

/// Arguments for the `preview` subcommand.
#[derive(clap::Args)]
pub struct PreviewArgs {
    /// Path to the input table.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of data rows to show.
    #[arg(short, long, default_value_t = 5)]
    pub rows: usize,

    /// Field delimiter (`,`, `;`, `tab`, ...).
    #[arg(short, long, default_value = ",")]
    pub delimiter: String,
}
