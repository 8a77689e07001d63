//! CSV Data Loader Module
//! Reads the population file and turns each line into a `Record`.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Field delimiter of the population file.
pub const DELIMITER: u8 = b',';

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One population observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub zone: String,
    pub year: i32,
    pub population: f64,
}

impl Record {
    pub fn new(zone: impl Into<String>, year: i32, population: f64) -> Self {
        Self {
            zone: zone.into(),
            year,
            population,
        }
    }
}

/// Loads population records from a delimited text file.
///
/// Nothing is cached: every call to [`DataLoader::load`] reads the file again
/// and returns freshly parsed records.
#[derive(Debug, Clone)]
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Get file path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read the whole file and parse it.
    pub fn load(&self) -> Result<Vec<Record>, LoaderError> {
        let text = fs::read_to_string(&self.file_path).map_err(|source| LoaderError::Io {
            path: self.file_path.clone(),
            source,
        })?;

        let records = Self::parse_records(&text);
        info!(
            path = %self.file_path.display(),
            records = records.len(),
            "population data loaded"
        );
        Ok(records)
    }

    /// Parse file content. The first record is a header and is always
    /// skipped. Fields are unquoted; rows may have fewer or more than three
    /// fields. Rows whose year or population is not numeric are dropped.
    pub fn parse_records(text: &str) -> Vec<Record> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(DELIMITER)
            .quoting(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        reader
            .records()
            .filter_map(|result| {
                let row = match result {
                    Ok(row) => row,
                    Err(e) => {
                        debug!(error = %e, "dropping unreadable row");
                        return None;
                    }
                };
                let record = Self::parse_row(&row);
                if record.is_none() {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    debug!(line, content = ?row, "dropping malformed row");
                }
                record
            })
            .collect()
    }

    fn parse_row(row: &csv::StringRecord) -> Option<Record> {
        let zone = row.get(0)?.trim();
        let year = parse_int_prefix(row.get(1)?)?;
        let population = parse_float_prefix(row.get(2)?)?;

        Some(Record::new(zone, year, population))
    }
}

/// Lenient integer parse: skips leading whitespace, then reads an optional
/// sign followed by as many decimal digits as possible. `"2000\r"` and
/// `"2000.7"` both give 2000. A year outside the `i32` range counts as a
/// parse failure.
pub fn parse_int_prefix(text: &str) -> Option<i32> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}

/// Lenient float parse: skips leading whitespace, then reads the longest
/// prefix that forms a decimal literal (`12`, `-3.5`, `.5`, `1e6`) or
/// `Infinity`. Trailing garbage is ignored.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            mantissa_digits += 1;
        }
        // A lone "." with no digits on either side is not a number
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
