//! BLS consumer-price-index pipeline: one `date,cpi` CSV per series.
//!
//! The raw files have the columns `series_id year period value
//! footnote_codes`. `period` is a month code `M01`..`M12`; `M13` marks an
//! annual average and never reaches the output.

use std::fs;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::Error;
use crate::fetch::SeriesSource;
use crate::output;
use crate::readers::whitespace::WhitespaceReader;
use crate::readers::DataReader;
use crate::types::{CpiOptions, RawTable, Result, SeriesSpec, ANNUAL_AVERAGE_PERIOD};
use crate::values::format_year_month;

/// Output header
pub const CPI_HEADERS: [&str; 2] = ["date", "cpi"];

/// Built-in series: (name, series id, download URL)
const SERIES_CATALOG: &[(&str, &str, &str)] = &[
    (
        "cpi_u_1913_2024",
        "CUSR0000SA0",
        "https://download.bls.gov/pub/time.series/cu/cu.data.1.AllItems",
    ),
    (
        "cpi_w_1913_2024",
        "CWSR0000SA0",
        "https://download.bls.gov/pub/time.series/cw/cw.data.1.AllItems",
    ),
    (
        "c_cpi_u_1999_2024",
        "SUUR0000SA0E",
        "https://download.bls.gov/pub/time.series/su/su.data.1.AllItems",
    ),
];

pub fn default_series() -> Vec<SeriesSpec> {
    SERIES_CATALOG
        .iter()
        .map(|(name, id, url)| SeriesSpec::new(name, id, url))
        .collect()
}

/// One monthly observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpiObservation {
    /// `YYYY-MM`
    pub date: String,
    /// Raw value string, unmodified
    pub cpi: String,
}

/// Combine `year` with the month digits of `period` (its last two characters)
pub fn period_to_date(year: &str, period: &str) -> Result<NaiveDate> {
    let split = period
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let month = &period[split..];
    NaiveDate::parse_from_str(&format!("{}-{}-01", year, month), "%Y-%m-%d").map_err(|e| {
        Error::MalformedInput(format!(
            "cannot parse year '{}' period '{}' as a month: {}",
            year, period, e
        ))
    })
}

fn column(raw: &RawTable, name: &str) -> Result<usize> {
    raw.column_index(name).ok_or_else(|| {
        Error::MalformedInput(format!("{}: missing column '{}'", raw.name, name))
    })
}

/// Monthly observations of `series_id` with a year strictly after `start_year`
pub fn extract_series(raw: &RawTable, series_id: &str, start_year: i32) -> Result<Vec<CpiObservation>> {
    let series_col = column(raw, "series_id")?;
    let year_col = column(raw, "year")?;
    let period_col = column(raw, "period")?;
    let value_col = column(raw, "value")?;

    let mut matched = 0usize;
    let mut observations = Vec::new();
    for (line, row) in raw.rows.iter().enumerate() {
        let field = |idx: usize| {
            row.get(idx).map(String::as_str).ok_or_else(|| {
                Error::MalformedInput(format!(
                    "{}: data row {} has {} fields",
                    raw.name,
                    line + 1,
                    row.len()
                ))
            })
        };

        if field(series_col)? != series_id {
            continue;
        }
        matched += 1;

        let period = field(period_col)?;
        if period == ANNUAL_AVERAGE_PERIOD {
            continue;
        }

        let date = period_to_date(field(year_col)?, period)?;
        if date.year() <= start_year {
            continue;
        }

        observations.push(CpiObservation {
            date: format_year_month(date),
            cpi: field(value_col)?.to_string(),
        });
    }

    if matched == 0 {
        return Err(Error::MalformedInput(format!(
            "{}: no rows for series '{}'",
            raw.name, series_id
        )));
    }
    Ok(observations)
}

/// Process every configured series. All series are parsed before any output
/// is written, so a failure in one leaves no CSV from the run.
pub fn run(options: &CpiOptions, source: &mut dyn SeriesSource) -> Result<Vec<(SeriesSpec, usize)>> {
    let mut results = Vec::with_capacity(options.series.len());
    for series in &options.series {
        let text = source.load(series)?;
        let raw = WhitespaceReader::new(&series.name, &text).read()?;
        let observations = extract_series(&raw, &series.series_id, options.start_year)?;
        info!(
            series = %series.name,
            series_id = %series.series_id,
            rows = observations.len(),
            "processed"
        );
        results.push((series, observations));
    }

    fs::create_dir_all(&options.output_dir)?;
    let mut written = Vec::with_capacity(results.len());
    for (series, observations) in results {
        let path = options.output_dir.join(format!("{}.csv", series.name));
        let rows: Vec<Vec<String>> = observations
            .into_iter()
            .map(|o| vec![o.date, o.cpi])
            .collect();
        output::write_csv(&path, &CPI_HEADERS, &rows)?;
        info!(series = %series.name, path = %path.display(), "wrote series");
        written.push((series.clone(), rows.len()));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashMap;
    use tempfile::tempdir;

    const RAW: &str = "series_id                     \tyear\tperiod\t       value\tfootnote_codes\n\
        CUSR0000SA0                   \t1946\tM12\t      19.5\t\n\
        CUSR0000SA0                   \t1947\tM01\t     21.48\t\n\
        CUSR0000SA0                   \t1947\tM13\t     22.30\t\n\
        CUSR0000SA0                   \t2020\tM05\t     257.8\t\n\
        CUSR0000SA0                   \t2020\tM13\t     258.8\tP\n\
        CUSR0000SA0E                  \t2020\tM05\t     111.1\t\n";

    struct MemorySource(HashMap<String, String>);

    impl SeriesSource for MemorySource {
        fn load(&mut self, series: &SeriesSpec) -> Result<String> {
            self.0
                .get(&series.name)
                .cloned()
                .ok_or_else(|| Error::UpstreamUnavailable {
                    url: series.url.clone(),
                    reason: "not found".to_string(),
                })
        }
    }

    fn table(text: &str) -> RawTable {
        WhitespaceReader::new("cpi_u", text).read().unwrap()
    }

    fn options(dir: &std::path::Path, series: Vec<SeriesSpec>) -> CpiOptions {
        CpiOptions {
            input_dir: dir.to_path_buf(),
            output_dir: dir.join("out"),
            series,
            ..CpiOptions::default()
        }
    }

    #[test]
    fn test_single_row_scenario() {
        let raw = table("series_id year period value footnote_codes\nCUSR0000SA0 2020 M05 257.8 \n");
        let observations = extract_series(&raw, "CUSR0000SA0", 1946).unwrap();
        assert_eq!(
            observations,
            vec![CpiObservation {
                date: "2020-05".to_string(),
                cpi: "257.8".to_string(),
            }]
        );
    }

    #[test]
    fn test_annual_average_rows_dropped() {
        let observations = extract_series(&table(RAW), "CUSR0000SA0", 1900).unwrap();
        let dates: Vec<&str> = observations.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, vec!["1946-12", "1947-01", "2020-05"]);
        assert!(observations.iter().all(|o| o.cpi != "22.30" && o.cpi != "258.8"));
    }

    #[test]
    fn test_threshold_is_strict() {
        let observations = extract_series(&table(RAW), "CUSR0000SA0", 1946).unwrap();
        let pattern = Regex::new(r"^\d{4}-\d{2}$").unwrap();
        assert_eq!(observations.len(), 2);
        for o in &observations {
            assert!(pattern.is_match(&o.date));
            assert!(o.date[..4].parse::<i32>().unwrap() > 1946);
        }
    }

    #[test]
    fn test_only_exact_series_id_kept() {
        let observations = extract_series(&table(RAW), "CUSR0000SA0E", 1946).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].cpi, "111.1");
    }

    #[test]
    fn test_missing_series_is_malformed() {
        let result = extract_series(&table(RAW), "CWSR0000SA0", 1946);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let raw = table("series_id year value\nCUSR0000SA0 2020 257.8\n");
        let result = extract_series(&raw, "CUSR0000SA0", 1946);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_bad_period_is_malformed() {
        let raw = table("series_id year period value\nCUSR0000SA0 2020 M14 1.0\n");
        assert!(matches!(
            extract_series(&raw, "CUSR0000SA0", 1946),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let raw = table("series_id year period value\nCUSR0000SA0 2020 M05\n");
        assert!(matches!(
            extract_series(&raw, "CUSR0000SA0", 1946),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_period_to_date() {
        let date = period_to_date("1999", "M09").unwrap();
        assert_eq!(format_year_month(date), "1999-09");
        assert!(period_to_date("1999", "M00").is_err());
        assert!(period_to_date("19x9", "M01").is_err());
    }

    #[test]
    fn test_default_catalog() {
        let series = default_series();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].name, "cpi_u_1913_2024");
        assert_eq!(series[0].series_id, "CUSR0000SA0");
        assert_eq!(series[2].series_id, "SUUR0000SA0E");
    }

    #[test]
    fn test_run_writes_one_file_per_series() {
        let dir = tempdir().unwrap();
        let series = vec![
            SeriesSpec::new("cpi_u", "CUSR0000SA0", "http://unused/u"),
            SeriesSpec::new("c_cpi_u", "CUSR0000SA0E", "http://unused/c"),
        ];
        let mut source = MemorySource(HashMap::from([
            ("cpi_u".to_string(), RAW.to_string()),
            ("c_cpi_u".to_string(), RAW.to_string()),
        ]));

        let written = run(&options(dir.path(), series), &mut source).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0].1, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("cpi_u.csv")).unwrap(),
            "date,cpi\n1947-01,21.48\n2020-05,257.8\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("out").join("c_cpi_u.csv")).unwrap(),
            "date,cpi\n2020-05,111.1\n"
        );
    }

    #[test]
    fn test_run_is_all_or_nothing() {
        let dir = tempdir().unwrap();
        let series = vec![
            SeriesSpec::new("good", "CUSR0000SA0", "http://unused/good"),
            SeriesSpec::new("bad", "CUSR0000SA0", "http://unused/bad"),
        ];
        let mut source = MemorySource(HashMap::from([
            ("good".to_string(), RAW.to_string()),
            (
                "bad".to_string(),
                "series_id year period value\nCUSR0000SA0 2020 Mxx 1.0\n".to_string(),
            ),
        ]));

        let result = run(&options(dir.path(), series), &mut source);

        assert!(matches!(result, Err(Error::MalformedInput(_))));
        assert!(!dir.path().join("out").join("good.csv").exists());
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = tempdir().unwrap();
        let series = vec![SeriesSpec::new("cpi_u", "CUSR0000SA0", "http://unused/u")];
        let mut source = MemorySource(HashMap::from([("cpi_u".to_string(), RAW.to_string())]));
        let opts = options(dir.path(), series);
        let path = dir.path().join("out").join("cpi_u.csv");

        run(&opts, &mut source).unwrap();
        let first = fs::read(&path).unwrap();
        run(&opts, &mut source).unwrap();

        assert_eq!(first, fs::read(&path).unwrap());
    }
}
