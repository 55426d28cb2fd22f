use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::Result;

/// Sibling path written first and renamed into place, so readers never see
/// a partially written file
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn commit(staging: &Path, path: &Path) -> Result<()> {
    fs::rename(staging, path)?;
    Ok(())
}

/// Write a header and string rows as CSV
pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let staging = staging_path(path);
    {
        let mut writer = csv::Writer::from_path(&staging)?;
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    commit(&staging, path)
}

/// Write a value to a pretty-printed JSON file
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let staging = staging_path(path);
    {
        let file = fs::File::create(&staging)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
    }
    commit(&staging, path)
}

/// Write a text file
pub fn write_text_file(content: &str, path: &Path) -> Result<()> {
    let staging = staging_path(path);
    fs::write(&staging, content)?;
    commit(&staging, path)
}
