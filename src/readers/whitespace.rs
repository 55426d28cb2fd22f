//! Reader for whitespace-separated text such as BLS time-series dumps.
//!
//! The first non-blank line is the header. Trailing empty fields (BLS leaves
//! `footnote_codes` blank on most rows) simply produce shorter rows.

use crate::types::{RawTable, Result};

use super::DataReader;

/// Reads a whitespace-delimited text buffer already held in memory
pub struct WhitespaceReader<'a> {
    name: String,
    text: &'a str,
}

impl<'a> WhitespaceReader<'a> {
    pub fn new(name: &str, text: &'a str) -> Self {
        Self {
            name: name.to_string(),
            text,
        }
    }
}

impl DataReader for WhitespaceReader<'_> {
    fn read(&mut self) -> Result<RawTable> {
        let mut table = RawTable::new(self.name.clone());
        let mut lines = self.text.lines().filter(|line| !line.trim().is_empty());

        if let Some(header) = lines.next() {
            table.headers = split_fields(header);
        }
        table.rows = lines.map(split_fields).collect();

        Ok(table)
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
