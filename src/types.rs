use std::path::PathBuf;

/// Default dataset name for the NHM birth-control import
pub const DEFAULT_DATASET_NAME: &str = "NHM_BirthControl";

/// Rows with a year at or below this threshold are dropped from CPI output
pub const DEFAULT_START_YEAR: i32 = 1946;

/// Default directory for raw inputs (and saved downloads)
pub const DEFAULT_INPUT_DIR: &str = "input_files";

/// Default directory for generated CSV and metadata files
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Upstream period code for annual-average rows
pub const ANNUAL_AVERAGE_PERIOD: &str = "M13";

/// Canonical date layout for every output date column
pub const YEAR_MONTH_FORMAT: &str = "%Y-%m";

/// A table of untyped string cells as read from a source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Source name (file name or series name)
    pub name: String,

    /// Header row, as written in the source
    pub headers: Vec<String>,

    /// Data rows; each row may be shorter than the header
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(name: String) -> Self {
        Self {
            name,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Index of a header by exact name
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Supported delimited file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            _ => None,
        }
    }
}

/// One named CPI series: where to download it and which series id to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    /// Series name; also the output file stem
    pub name: String,

    /// BLS series identifier, e.g. `CUSR0000SA0`
    pub series_id: String,

    /// Download URL of the raw time-series file
    pub url: String,
}

impl SeriesSpec {
    pub fn new(name: &str, series_id: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            series_id: series_id.to_string(),
            url: url.to_string(),
        }
    }
}

/// Options for the birth-control pipeline
#[derive(Debug, Clone)]
pub struct BirthControlOptions {
    /// Directory scanned for raw `.csv`/`.tsv` files
    pub input_dir: PathBuf,

    /// Directory receiving the combined CSV and metadata
    pub output_dir: PathBuf,

    /// Output file stem
    pub dataset_name: String,

    /// Explicit input files; when empty the input directory is scanned
    pub files: Vec<PathBuf>,
}

impl Default for BirthControlOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            files: Vec::new(),
        }
    }
}

/// Options for the CPI pipeline
#[derive(Debug, Clone)]
pub struct CpiOptions {
    /// Directory where raw downloads are saved (or read from when offline)
    pub input_dir: PathBuf,

    /// Directory receiving one CSV per series
    pub output_dir: PathBuf,

    /// Keep rows whose year is strictly greater than this
    pub start_year: i32,

    /// Series to process, in order
    pub series: Vec<SeriesSpec>,

    /// Read previously saved raw files instead of downloading
    pub offline: bool,
}

impl Default for CpiOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            start_year: DEFAULT_START_YEAR,
            series: crate::transform::cpi::default_series(),
            offline: false,
        }
    }
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
