use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rusty_eda::data::loader::load_file;
use rusty_eda::{LocationReport, ReportConfig};

/// Location estimates of a tabular dataset.
///
/// Prints the mean, trimmed mean and median of one column, and the weighted
/// and unweighted mean of another.
#[derive(Parser, Debug)]
#[command(name = "rusty-eda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data file (.csv, .json or .parquet)
    path: PathBuf,

    /// Column summarised by mean, trimmed mean and median
    #[arg(long, default_value = "Population")]
    measure: String,

    /// Proportion cut from each tail for the trimmed mean
    #[arg(long, default_value = "0.1")]
    trim: f64,

    /// Grouping column for the weighted mean
    #[arg(long, default_value = "State")]
    group: String,

    /// Column averaged by the weighted and unweighted means
    #[arg(long, default_value = "Murder.Rate")]
    value: String,

    /// Weight column for the weighted mean
    #[arg(long, default_value = "Population")]
    weight: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            measure: self.measure.clone(),
            trim_proportion: self.trim,
            group: self.group.clone(),
            value: self.value.clone(),
            weight: self.weight.clone(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.report_config();
    log::debug!("{config:?}");

    let dataset = load_file(&cli.path)?;
    let report = LocationReport::compute(&dataset, &config)
        .with_context(|| format!("computing statistics for {}", cli.path.display()))?;

    match cli.format {
        Format::Text => println!("{report}"),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        ),
    }
    Ok(())
}
