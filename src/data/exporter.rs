//! CSV Exporter Module
//! Writes the currently filtered records back to comma-delimited text.

use super::loader::DELIMITER;
use super::zones::filter_by_zone;
use super::Record;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default name offered for the exported file.
pub const EXPORT_FILE_NAME: &str = "population_data.csv";

/// Fixed header line of the exported file.
pub const EXPORT_HEADER: &str = "Zone géographique,Année,Population";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize records: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Exporter;

impl Exporter {
    /// Serialize the records matching `zone` (`None` = all).
    ///
    /// Field values are written as-is; a delimiter inside a zone name is not
    /// escaped. Rows are separated by `\n` with no newline after the last one.
    pub fn to_csv(records: &[Record], zone: Option<&str>) -> Result<String, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(EXPORT_HEADER.split(DELIMITER as char))?;

        let rows = filter_by_zone(records, zone);
        for record in &rows {
            writer.write_record([
                record.zone.clone(),
                record.year.to_string(),
                format_population_field(record.population),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
        let mut content = String::from_utf8_lossy(&bytes).into_owned();
        if !rows.is_empty() {
            content.pop();
        }
        Ok(content)
    }

    /// Serialize and write to `path`. Returns the number of exported rows.
    pub fn write(records: &[Record], zone: Option<&str>, path: &Path) -> Result<usize, ExportError> {
        let content = Self::to_csv(records, zone)?;
        fs::write(path, content.as_bytes()).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let count = filter_by_zone(records, zone).len();
        info!(path = %path.display(), rows = count, zone = zone.unwrap_or("*"), "data exported");
        Ok(count)
    }
}

/// Shortest round-trip form (`700.5`, `3700`); infinities as `Infinity` so
/// the loader reads them back.
fn format_population_field(value: f64) -> String {
    match value {
        v if v == f64::INFINITY => "Infinity".to_string(),
        v if v == f64::NEG_INFINITY => "-Infinity".to_string(),
        v => v.to_string(),
    }
}
