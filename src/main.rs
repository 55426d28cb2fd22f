mod cli;
mod error;
mod fetch;
mod logging;
mod mapping;
mod metadata;
mod output;
mod readers;
mod transform;
mod types;
mod values;

use std::fs;

use clap::Parser;
use cli::{Cli, Commands};
use fetch::{HttpSource, RetryPolicy, SavedFileSource, SeriesSource};
use tracing::info;
use types::{BirthControlOptions, CpiOptions, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::BirthControl {
            input_dir,
            output_dir,
            dataset_name,
            files,
        } => {
            let options = BirthControlOptions {
                input_dir,
                output_dir,
                dataset_name,
                files,
            };

            let summary = transform::birth_control::run(&options)?;
            info!(
                files = summary.files_read,
                rows = summary.rows_written,
                "birth-control import complete"
            );
            eprintln!("Dataset written to: {}", summary.csv_path.display());
            eprintln!("Schema written to: {}", summary.schema_path.display());
            eprintln!("Template MCF written to: {}", summary.tmcf_path.display());
        }
        Commands::Cpi {
            input_dir,
            output_dir,
            start_year,
            series,
            custom,
            offline,
        } => {
            let options = CpiOptions {
                input_dir,
                output_dir,
                start_year,
                series: cli::select_series(&series, &custom)?,
                offline,
            };

            let mut source: Box<dyn SeriesSource> = if options.offline {
                Box::new(SavedFileSource::new(options.input_dir.clone()))
            } else {
                fs::create_dir_all(&options.input_dir)?;
                Box::new(HttpSource::new(
                    fetch::build_client()?,
                    RetryPolicy::default(),
                    options.input_dir.clone(),
                ))
            };

            let written = transform::cpi::run(&options, source.as_mut())?;
            for (spec, rows) in &written {
                eprintln!(
                    "{} ({}): {} rows -> {}",
                    spec.name,
                    spec.series_id,
                    rows,
                    options.output_dir.join(format!("{}.csv", spec.name)).display()
                );
            }
        }
    }

    Ok(())
}
