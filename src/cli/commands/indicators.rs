//! Indicators command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use stockta_config::load_config;
use stockta_data::{default_file_name, export_csv, export_csv_file, load_csv, IndicatorReport};
use stockta_indicators::IndicatorSet;
use tracing::{info, warn};

use crate::cli::{IndicatorsArgs, OutputFormat};

pub async fn run(args: IndicatorsArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    info!("Computing indicators for {}", args.symbol);

    let series = load_csv(&args.data, &args.symbol)
        .with_context(|| format!("Failed to load data from {:?}", args.data))?;
    let series = series
        .between(args.start, args.end)
        .context("No observations in the requested date range")?;

    let min_points = config.analysis.min_points;
    if min_points > 0 && series.len() < min_points {
        anyhow::bail!(
            "Not enough data: need at least {} observations, have {}",
            min_points,
            series.len()
        );
    }

    let set = IndicatorSet::new(config.indicators).context("Invalid indicator parameters")?;
    if series.len() < set.params().longest_window() {
        warn!(
            points = series.len(),
            longest_window = set.params().longest_window(),
            "Some indicators will be undefined for the whole series"
        );
    }

    let bundle = if args.sequential {
        set.compute(&series)?
    } else {
        set.compute_concurrent(&series).await?
    };
    info!(points = bundle.len(), "Indicators computed");

    let report = IndicatorReport::new(&bundle);

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Csv => export_csv(report.bundle(), std::io::stdout().lock())?,
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save) = &args.save {
        let extension = match args.output {
            OutputFormat::Json => "json",
            OutputFormat::Csv | OutputFormat::Text => "csv",
        };
        let path = resolve_save_path(save, &bundle.symbol, extension);

        match args.output {
            OutputFormat::Json => std::fs::write(&path, report.to_json()?)?,
            OutputFormat::Csv | OutputFormat::Text => export_csv_file(report.bundle(), &path)?,
        }
        info!("Results saved to {:?}", path);
    }

    Ok(())
}

fn resolve_save_path(save: &Path, symbol: &str, extension: &str) -> PathBuf {
    if save.is_dir() {
        save.join(default_file_name(symbol, Local::now().naive_local(), extension))
    } else {
        save.to_path_buf()
    }
}
