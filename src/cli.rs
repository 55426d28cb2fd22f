use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Error;
use crate::transform::cpi::default_series;
use crate::types::{
    Result, SeriesSpec, DEFAULT_DATASET_NAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
    DEFAULT_START_YEAR,
};

/// Normalize government statistical datasets into import-ready CSV
#[derive(Parser, Debug)]
#[command(name = "statvar-import")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge NHM birth-control releases into one CSV plus schema and README
    BirthControl {
        /// Directory holding the raw .csv/.tsv releases
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        /// Output directory
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Output file stem
        #[arg(long, default_value = DEFAULT_DATASET_NAME)]
        dataset_name: String,

        /// Explicit input file (repeatable); replaces the directory scan
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },

    /// Download BLS CPI series and write one date,cpi CSV per series
    Cpi {
        /// Directory for saved raw downloads
        #[arg(long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,

        /// Output directory
        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Keep observations with a year strictly after this
        #[arg(long, default_value_t = DEFAULT_START_YEAR)]
        start_year: i32,

        /// Built-in series to process (repeatable; default: all)
        #[arg(long = "series")]
        series: Vec<String>,

        /// Extra series as NAME,SERIES_ID,URL (repeatable)
        #[arg(long = "custom", value_parser = parse_series_spec)]
        custom: Vec<SeriesSpec>,

        /// Read raw files saved in the input directory instead of downloading
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

/// Parse `NAME,SERIES_ID,URL`
pub fn parse_series_spec(value: &str) -> std::result::Result<SeriesSpec, String> {
    let parts: Vec<&str> = value.splitn(3, ',').map(str::trim).collect();
    match parts.as_slice() {
        [name, id, url] if !name.is_empty() && !id.is_empty() && !url.is_empty() => {
            Ok(SeriesSpec::new(name, id, url))
        }
        _ => Err(format!("expected NAME,SERIES_ID,URL, got '{}'", value)),
    }
}

/// Resolve the series to run: named built-ins followed by custom specs.
/// With neither, every built-in series runs.
pub fn select_series(names: &[String], custom: &[SeriesSpec]) -> Result<Vec<SeriesSpec>> {
    let catalog = default_series();
    if names.is_empty() && custom.is_empty() {
        return Ok(catalog);
    }

    let mut selected = Vec::with_capacity(names.len() + custom.len());
    for name in names {
        let spec = catalog
            .iter()
            .find(|s| &s.name == name)
            .ok_or_else(|| Error::InvalidInput(format!("unknown series '{}'", name)))?;
        selected.push(spec.clone());
    }
    selected.extend(custom.iter().cloned());
    Ok(selected)
}
