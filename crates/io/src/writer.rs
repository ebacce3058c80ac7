//! Labelled matrix output as delimited text or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sojourn_tpm::LabeledMatrix;
use tracing::info;

use crate::error::IoError;
use crate::reader::validate_delimiter;

/// Output encoding for an estimated matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Delimited text: header of labels, each row prefixed by its label.
    #[default]
    Csv,
    /// Pretty-printed JSON with labels, counts, probabilities and
    /// degenerate rows.
    Json,
}

/// Configuration for writing an estimated matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Output encoding.
    format: OutputFormat,
    /// Field delimiter byte for delimited output.
    delimiter: u8,
    /// Fixed number of decimals, or `None` for shortest round-trip output.
    precision: Option<usize>,
    /// Text of the top-left header cell.
    corner_label: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delimiter: b',',
            precision: None,
            corner_label: "from".to_string(),
        }
    }
}

impl WriterConfig {
    /// Sets the output encoding.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets a fixed number of decimals (`None` writes values exactly).
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the text of the top-left header cell.
    pub fn with_corner_label(mut self, label: impl Into<String>) -> Self {
        self.corner_label = label.into();
        self
    }

    /// Returns the output encoding.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the configured precision.
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Returns the text of the top-left header cell.
    pub fn corner_label(&self) -> &str {
        &self.corner_label
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for an unusable delimiter or a
    /// precision above 17 decimals.
    pub fn validate(&self) -> Result<(), IoError> {
        validate_delimiter(self.delimiter)?;
        if let Some(p) = self.precision
            && p > 17
        {
            return Err(IoError::Validation {
                count: 1,
                details: format!("precision must be at most 17, got {p}"),
            });
        }
        Ok(())
    }

    /// Formats one probability according to the configured precision.
    pub fn format_value(&self, v: f64) -> String {
        match self.precision {
            Some(p) => format!("{v:.p$}"),
            None => format!("{v}"),
        }
    }
}

/// Write an estimated matrix to a file.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for a bad configuration,
/// [`IoError::File`] if the file cannot be created, [`IoError::Write`] if
/// writing fails part-way, and [`IoError::Csv`] / [`IoError::Json`] on
/// encoding failures.
pub fn write_matrix(
    path: &Path,
    matrix: &LabeledMatrix,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let file = File::create(path).map_err(|e| IoError::File {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    write_matrix_to(BufWriter::new(file), matrix, config)?;
    info!(
        path = %path.display(),
        n_states = matrix.n_states(),
        "transition matrix written"
    );
    Ok(())
}

/// Write an estimated matrix to any writer.
///
/// See [`write_matrix`] for error conditions.
pub fn write_matrix_to<W: Write>(
    writer: W,
    matrix: &LabeledMatrix,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    match config.format {
        OutputFormat::Csv => write_delimited(writer, matrix, config),
        OutputFormat::Json => {
            let mut writer = writer;
            let json = to_json(matrix)?;
            writer
                .write_all(json.as_bytes())
                .and_then(|_| writer.write_all(b"\n"))
                .and_then(|_| writer.flush())
                .map_err(|e| IoError::Write {
                    reason: e.to_string(),
                })
        }
    }
}

/// Serialize an estimated matrix to pretty-printed JSON.
pub fn to_json(matrix: &LabeledMatrix) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(matrix)?)
}

fn write_delimited<W: Write>(
    writer: W,
    matrix: &LabeledMatrix,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    let mut header = Vec::with_capacity(matrix.n_states() + 1);
    header.push(config.corner_label.clone());
    header.extend(matrix.labels().iter().cloned());
    wtr.write_record(&header)?;

    for (label, row) in matrix.rows() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(label.to_string());
        record.extend(row.iter().map(|&p| config.format_value(p)));
        wtr.write_record(&record)?;
    }

    wtr.flush().map_err(|e| IoError::Write {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sojourn_tpm::{AssignmentMode, estimate_from_sequence};

    fn sample() -> LabeledMatrix {
        estimate_from_sequence(
            vec!["A".to_string(), "B".to_string()],
            &[vec![0.6, 0.4], vec![0.3, 0.7], vec![0.8, 0.2], vec![0.1, 0.9]],
            AssignmentMode::Dominant,
        )
        .unwrap()
    }

    #[test]
    fn default_config_values() {
        let cfg = WriterConfig::default();
        assert_eq!(cfg.format(), OutputFormat::Csv);
        assert_eq!(cfg.precision(), None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_precision_limit() {
        let cfg = WriterConfig::default().with_precision(Some(18));
        match cfg.validate().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("precision"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn format_value_precision() {
        let exact = WriterConfig::default();
        assert_eq!(exact.format_value(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(exact.format_value(1.0), "1");
        let fixed = WriterConfig::default().with_precision(Some(3));
        assert_eq!(fixed.format_value(1.0 / 3.0), "0.333");
        assert_eq!(fixed.format_value(0.0), "0.000");
    }

    #[test]
    fn delimited_layout() {
        // A -> B, B -> A, A -> B
        let mut buf = Vec::new();
        write_matrix_to(&mut buf, &sample(), &WriterConfig::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "from,A,B\nA,0,1\nB,1,0\n");
    }

    #[test]
    fn tab_delimited_with_corner() {
        let cfg = WriterConfig::default()
            .with_delimiter(b'\t')
            .with_corner_label("state")
            .with_precision(Some(2));
        let mut buf = Vec::new();
        write_matrix_to(&mut buf, &sample(), &cfg).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "state\tA\tB\nA\t0.00\t1.00\nB\t1.00\t0.00\n");
    }

    #[test]
    fn json_output() {
        let mut buf = Vec::new();
        let cfg = WriterConfig::default().with_format(OutputFormat::Json);
        write_matrix_to(&mut buf, &sample(), &cfg).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["labels"], serde_json::json!(["A", "B"]));
        assert_eq!(v["mode"], "dominant");
        assert_eq!(v["degenerate_rows"], serde_json::json!([]));
    }
}
