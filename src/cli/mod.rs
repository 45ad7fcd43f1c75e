//! Command-line interface definitions.

pub mod banner;
pub mod check;
pub mod forecast;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// marketcast - Multi-model forecasting for prediction-market events.
#[derive(Parser, Debug)]
#[command(name = "marketcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast a single prediction-market event
    Forecast(ForecastArgs),

    /// Validate configuration without forecasting anything
    Check(CheckArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(Parser, Debug)]
pub struct ForecastArgs {
    /// Event reference: a market URL, a market slug, or free text
    pub reference: String,

    /// Skip the ASCII art banner
    #[arg(long)]
    pub no_banner: bool,

    /// Print the full JSON prediction envelope instead of a summary table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub target: CheckTarget,
}

#[derive(Subcommand, Debug)]
pub enum CheckTarget {
    /// Validate the configuration file
    Config,
    /// Probe reachability of the configured market API
    Connection,
}
