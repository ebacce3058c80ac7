//! Delimited-text table reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sojourn_tpm::ObservationTable;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::{ValidationCollector, parse_cell, validate_header};

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading delimited text tables.
///
/// The [`Default`] implementation reads comma-separated UTF-8 with a header
/// row, trimming whitespace around every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Field delimiter byte.
    delimiter: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ReaderConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the delimiter is not a printable
    /// ASCII byte or tab, or is the quote character.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_delimiter(self.delimiter)
    }

    pub(crate) fn csv_reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
    }
}

pub(crate) fn validate_delimiter(delimiter: u8) -> Result<(), IoError> {
    let printable = delimiter == b'\t' || delimiter.is_ascii_graphic() || delimiter == b' ';
    if !printable || delimiter == b'"' {
        return Err(IoError::Validation {
            count: 1,
            details: format!("unusable delimiter byte {delimiter:#04x}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// read_table
// ---------------------------------------------------------------------------

/// Read an observation table from a delimited text file.
///
/// Column 0 is taken verbatim as the period identifier; every other cell must
/// parse as a number. All cell and header problems are reported together.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Validation`] for header or cell problems, [`IoError::Csv`] for
/// malformed text, and [`IoError::Table`] for table-shape violations.
pub fn read_table(path: &Path, config: &ReaderConfig) -> Result<ObservationTable, IoError> {
    config.validate()?;
    let file = open(path)?;
    info!(path = %path.display(), "reading observation table");
    read_table_from(file, config)
}

/// Read an observation table from any reader.
///
/// See [`read_table`] for the format and error conditions.
pub fn read_table_from<R: Read>(
    reader: R,
    config: &ReaderConfig,
) -> Result<ObservationTable, IoError> {
    config.validate()?;
    let mut rdr = config.csv_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    validate_header(&columns).finish()?;

    let width = columns.len();
    let mut errors = ValidationCollector::new();
    let mut periods = Vec::new();
    let mut values = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != width {
            errors.push(format!(
                "line {line}: expected {width} fields, got {}",
                record.len()
            ));
            continue;
        }

        let mut row_errors = ValidationCollector::new();
        let row: Vec<f64> = columns[1..]
            .iter()
            .zip(record.iter().skip(1))
            .filter_map(|(column, cell)| parse_cell(cell, line, column, &mut row_errors))
            .collect();

        if row_errors.is_empty() {
            periods.push(record[0].to_string());
            values.push(row);
        } else {
            errors.merge(row_errors);
        }
    }

    errors.finish()?;
    debug!(
        n_columns = width,
        n_rows = values.len(),
        "parsed observation table"
    );

    Ok(ObservationTable::new(columns, periods, values)?)
}

pub(crate) fn open(path: &Path) -> Result<File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|e| IoError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
