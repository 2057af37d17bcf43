use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use rusty_eda::data::sample::{sample_states, write_file};

/// Write a synthetic state population / murder-rate table.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; the format follows the extension (.csv or .parquet)
    #[arg(default_value = "sample_states.parquet")]
    output: PathBuf,

    /// Number of states
    #[arg(short = 'n', long, default_value = "50")]
    rows: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rows = sample_states(args.rows, args.seed);
    write_file(&args.output, &rows)?;
    log::debug!("generated {} rows with seed {}", rows.len(), args.seed);

    println!("Wrote {} states to {}", rows.len(), args.output.display());
    Ok(())
}
