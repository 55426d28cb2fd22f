pub mod csv;
pub mod whitespace;

use std::path::Path;

use crate::error::Error;
use crate::types::{FileFormat, RawTable, Result};

/// Common trait for raw table readers
pub trait DataReader {
    /// Read the source into an untyped table
    fn read(&mut self) -> Result<RawTable>;
}

/// Pick the delimited-text reader for a raw release by its extension
pub fn create_reader(path: &Path) -> Result<Box<dyn DataReader>> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(FileFormat::from_extension)
        .ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "{}: expected a .csv or .tsv release",
                path.display()
            ))
        })?;

    let delimiter = match format {
        FileFormat::Csv => b',',
        FileFormat::Tsv => b'\t',
    };
    Ok(Box::new(csv::CsvReader::with_delimiter(path, delimiter)))
}
