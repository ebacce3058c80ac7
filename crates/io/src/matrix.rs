//! Re-reading a written transition matrix.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::IoError;
use crate::reader::ReaderConfig;
use crate::validate::{ValidationCollector, parse_cell, validate_header};

/// A labelled square matrix parsed back from delimited text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixTable {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl MatrixTable {
    /// State labels in header order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Matrix rows in label order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Value at row `from`, column `to`, looked up by label.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == from)?;
        let j = self.labels.iter().position(|l| l == to)?;
        Some(self.rows[i][j])
    }
}

/// Read a labelled matrix written by [`write_matrix`](crate::write_matrix).
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist and
/// [`IoError::Validation`] if the text is not a square labelled matrix.
pub fn read_matrix(path: &Path, config: &ReaderConfig) -> Result<MatrixTable, IoError> {
    config.validate()?;
    let file = crate::reader::open(path)?;
    info!(path = %path.display(), "reading transition matrix");
    read_matrix_from(file, config)
}

/// Read a labelled matrix from any reader.
///
/// The header is a corner cell followed by N labels; each of the N data rows
/// starts with the label of the same position.
pub fn read_matrix_from<R: Read>(reader: R, config: &ReaderConfig) -> Result<MatrixTable, IoError> {
    config.validate()?;
    let mut rdr = config.csv_reader(reader);

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if header.len() < 2 {
        return Err(IoError::Validation {
            count: 1,
            details: format!("matrix header needs a corner cell and labels, got {} cells", header.len()),
        });
    }
    let labels = header[1..].to_vec();
    validate_header(&labels).finish()?;

    let n = labels.len();
    let mut errors = ValidationCollector::new();
    let mut rows = Vec::with_capacity(n);

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if i >= n {
            errors.push(format!("line {line}: more rows than labels ({n})"));
            continue;
        }
        if record.len() != n + 1 {
            errors.push(format!(
                "line {line}: expected {} fields, got {}",
                n + 1,
                record.len()
            ));
            continue;
        }
        if record[0] != labels[i] {
            errors.push(format!(
                "line {line}: row label {:?} does not match column label {:?}",
                &record[0], labels[i]
            ));
        }
        let row: Vec<f64> = labels
            .iter()
            .zip(record.iter().skip(1))
            .filter_map(|(column, cell)| parse_cell(cell, line, column, &mut errors))
            .collect();
        rows.push(row);
    }

    if rows.len() < n && errors.is_empty() {
        errors.push(format!("expected {n} rows, got {}", rows.len()));
    }
    errors.finish()?;

    Ok(MatrixTable { labels, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_square_matrix() {
        let text = "from,A,B\nA,0.25,0.75\nB,1,0\n";
        let m = read_matrix_from(text.as_bytes(), &ReaderConfig::default()).unwrap();
        assert_eq!(m.labels(), &["A", "B"]);
        assert_eq!(m.rows(), &[vec![0.25, 0.75], vec![1.0, 0.0]]);
        assert_eq!(m.get("A", "B"), Some(0.75));
        assert_eq!(m.get("C", "B"), None);
    }

    #[test]
    fn rejects_mismatched_row_label() {
        let text = "from,A,B\nB,0.5,0.5\nA,1,0\n";
        let err = read_matrix_from(text.as_bytes(), &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 2, .. }));
    }

    #[test]
    fn rejects_missing_rows() {
        let text = "from,A,B\nA,0.5,0.5\n";
        let err = read_matrix_from(text.as_bytes(), &ReaderConfig::default()).unwrap_err();
        match err {
            IoError::Validation { details, .. } => assert!(details.contains("expected 2 rows")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_extra_rows() {
        let text = "from,A\nA,1\nB,1\n";
        let err = read_matrix_from(text.as_bytes(), &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }

    #[test]
    fn trims_like_the_table_reader() {
        let text = "from ; A ; B\n A ; 0.5 ; 0.5 \nB;1;0\n";
        let cfg = ReaderConfig::default().with_delimiter(b';');
        let m = read_matrix_from(text.as_bytes(), &cfg).unwrap();
        assert_eq!(m.labels(), &["A", "B"]);
        assert_eq!(m.get("A", "B"), Some(0.5));
    }

    #[test]
    fn rejects_corner_only_header() {
        let err = read_matrix_from("from\n".as_bytes(), &ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, IoError::Validation { .. }));
    }
}
