use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};

use crate::types::{RawTable, Result};

use super::DataReader;

/// Reader for one raw release in comma- or tab-separated form
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    pub fn with_delimiter(path: &Path, delimiter: u8) -> Self {
        Self {
            path: path.to_path_buf(),
            delimiter,
        }
    }

    /// Releases differ in row width, so ragged rows are accepted
    fn open(&self) -> Result<Reader<BufReader<File>>> {
        let file = BufReader::new(File::open(&self.path)?);
        Ok(ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(file))
    }
}

impl DataReader for CsvReader {
    fn read(&mut self) -> Result<RawTable> {
        let mut reader = self.open()?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let mut table = RawTable::new(file_name);

        // Headers are kept verbatim; column lookup is exact
        table.headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        for result in reader.records() {
            let record = result?;
            table.rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(table)
    }
}
