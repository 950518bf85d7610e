use anyhow::{Context, Result};
use clap::Parser;
use growlog_core::store::Garden;
use std::path::PathBuf;

mod input;
mod menu;
mod plotting;

#[derive(Parser, Debug)]
#[command(name = "growlog", version, about = "Track plant growth and nutrient schedules")]
struct Cli {
    /// Path to the garden data file.
    #[arg(short = 'd', long = "data-file", default_value = "garden.yaml")]
    data_file: PathBuf,

    /// Directory charts and CSV exports are written to.
    #[arg(short = 'o', long = "output-dir", default_value = "reports")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- Growlog Plant Tracker ---");

    let mut garden = Garden::load_or_default(&cli.data_file)
        .with_context(|| format!("Failed to load garden from {:?}", cli.data_file))?;

    menu::run(&mut garden, &cli.data_file, &cli.output_dir)
}
