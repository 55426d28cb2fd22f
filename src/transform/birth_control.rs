//! NHM birth-control pipeline: merge every raw release into one CSV with
//! statistical-variable column names.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Error;
use crate::mapping::{ColumnLookup, ColumnTable, BIRTH_CONTROL};
use crate::metadata::{DatasetSchema, DATE_COLUMN};
use crate::output;
use crate::readers::create_reader;
use crate::types::{BirthControlOptions, FileFormat, RawTable, Result};
use crate::values::{coerce_value, format_year_month, parse_year_month};

const DESCRIPTION: &str = "Birth Control Data";
const DATA_LEVEL: &str = "State level";

/// Rows of all input files under the canonical header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Files written by a run
#[derive(Debug, Clone, PartialEq)]
pub struct BirthControlSummary {
    pub csv_path: PathBuf,
    pub schema_path: PathBuf,
    pub tmcf_path: PathBuf,
    pub readme_path: PathBuf,
    pub files_read: usize,
    pub rows_written: usize,
}

/// For each canonical column, the source column feeding it (if any).
/// When a file carries two synonyms of the same column, the later one wins.
fn project(table: &RawTable, columns: &ColumnTable, canonical: &[&'static str]) -> Vec<Option<usize>> {
    let mut slots = vec![None; canonical.len()];
    for (idx, header) in table.headers.iter().enumerate() {
        match columns.lookup(header) {
            ColumnLookup::Mapped { id, label } => {
                debug!(file = %table.name, column = %header, id, label, "mapped column");
                if let Some(pos) = canonical.iter().position(|c| *c == id) {
                    if let Some(previous) = slots[pos] {
                        debug!(
                            file = %table.name,
                            column = id,
                            replaced = %table.headers[previous],
                            by = %header,
                            "duplicate source for canonical column"
                        );
                    }
                    slots[pos] = Some(idx);
                }
            }
            ColumnLookup::Unmapped => {
                debug!(file = %table.name, column = %header, "dropping unmapped column");
            }
        }
    }
    slots
}

fn canonical_value(column: &str, raw: &str) -> String {
    if column == DATE_COLUMN {
        match parse_year_month(raw) {
            Some(date) => format_year_month(date),
            None => coerce_value(raw),
        }
    } else {
        coerce_value(raw)
    }
}

/// Rename, select and concatenate raw tables. The header lists the canonical
/// columns present in at least one table, in mapping-table order.
pub fn combine(tables: &[RawTable], columns: &ColumnTable) -> CanonicalTable {
    let canonical = columns.canonical_columns();
    let projections: Vec<Vec<Option<usize>>> = tables
        .iter()
        .map(|t| project(t, columns, &canonical))
        .collect();

    let present: Vec<usize> = (0..canonical.len())
        .filter(|pos| projections.iter().any(|p| p[*pos].is_some()))
        .collect();

    let mut combined = CanonicalTable {
        headers: present.iter().map(|pos| canonical[*pos]).collect(),
        rows: Vec::new(),
    };

    for (table, projection) in tables.iter().zip(&projections) {
        for row in &table.rows {
            let values = present
                .iter()
                .map(|pos| {
                    projection[*pos]
                        .and_then(|idx| row.get(idx))
                        .map(|raw| canonical_value(canonical[*pos], raw))
                        .unwrap_or_default()
                })
                .collect();
            combined.rows.push(values);
        }
    }

    combined
}

/// Input files for a run: the explicit list, or every `.csv`/`.tsv` in the
/// input directory sorted by name (excluding `exclude`)
pub fn input_files(options: &BirthControlOptions, exclude: &Path) -> Result<Vec<PathBuf>> {
    if !options.files.is_empty() {
        return Ok(options.files.clone());
    }

    // Compare resolved paths so `dir/sub/..` and `dir` name the same file
    let exclude = fs::canonicalize(exclude).ok();
    let mut files = Vec::new();
    for entry in fs::read_dir(&options.input_dir)? {
        let path = entry?.path();
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileFormat::from_extension)
            .is_some();
        let is_output = exclude.is_some() && fs::canonicalize(&path).ok() == exclude;
        if path.is_file() && supported && !is_output {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(Error::MalformedInput(format!(
            "no .csv or .tsv files in {}",
            options.input_dir.display()
        )));
    }
    Ok(files)
}

/// Run the pipeline. Everything is read and combined before any file is
/// written; a missing or unreadable input aborts with no output.
pub fn run(options: &BirthControlOptions) -> Result<BirthControlSummary> {
    let columns: &ColumnTable = &BIRTH_CONTROL;
    let csv_path = options
        .output_dir
        .join(format!("{}.csv", options.dataset_name));
    let schema_path = options
        .output_dir
        .join(format!("{}_schema.json", options.dataset_name));
    let tmcf_path = options
        .output_dir
        .join(format!("{}.tmcf", options.dataset_name));
    let readme_path = options.output_dir.join("README.md");

    let files = input_files(options, &csv_path)?;
    let mut tables = Vec::with_capacity(files.len());
    for path in &files {
        let table = create_reader(path)?.read()?;
        info!(file = %path.display(), rows = table.rows.len(), "loaded");
        tables.push(table);
    }

    let combined = combine(&tables, columns);
    if combined.headers.is_empty() {
        warn!(table = columns.name(), "no input column matched the mapping table");
    }

    let schema = DatasetSchema::from_table(
        &options.dataset_name,
        DESCRIPTION,
        DATA_LEVEL,
        columns,
        &combined.headers,
    );

    fs::create_dir_all(&options.output_dir)?;
    output::write_csv(&csv_path, &combined.headers, &combined.rows)?;
    output::write_json_file(&schema, &schema_path)?;
    output::write_text_file(&schema.tmcf(), &tmcf_path)?;
    output::write_text_file(&schema.readme(), &readme_path)?;
    info!(
        path = %csv_path.display(),
        rows = combined.rows.len(),
        columns = combined.headers.len(),
        "wrote dataset"
    );

    Ok(BirthControlSummary {
        csv_path,
        schema_path,
        tmcf_path,
        readme_path,
        files_read: files.len(),
        rows_written: combined.rows.len(),
    })
}
