//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockta")]
#[command(author, version, about = "Technical indicators for daily stock price series")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the indicator battery for one security
    Indicators(IndicatorsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Data file (CSV) with date, open, high, low, close, volume[, amount]
    #[arg(long)]
    pub data: PathBuf,

    /// Symbol label for the series
    #[arg(short = 'S', long, default_value = "DATA")]
    pub symbol: String,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save results to a file, or into a directory with a timestamped name
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Compute indicators on the calling thread instead of fanning out
    #[arg(long)]
    pub sequential: bool,
}
