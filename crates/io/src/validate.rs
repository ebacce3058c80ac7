//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus helpers that check a
//! delimited table's header and cells.

use std::collections::HashSet;

use crate::error::IoError;

/// Cap on the number of messages kept in the details string.
const MAX_DETAILS: usize = 20;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error from `other` into this collector.
    pub(crate) fn merge(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins the first 20 messages with `"; "`; `count`
    /// always reports the full number.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        let mut details = self
            .errors
            .into_iter()
            .take(MAX_DETAILS)
            .collect::<Vec<_>>()
            .join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Err(IoError::Validation { count, details })
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that a header exists and that its labels are non-blank and unique.
pub(crate) fn validate_header(labels: &[String]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    if labels.is_empty() {
        c.push("missing header row");
        return c;
    }

    let mut seen = HashSet::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if label.is_empty() {
            c.push(format!("blank column label at position {}", i + 1));
            continue;
        }
        if !seen.insert(label.as_str()) {
            c.push(format!("duplicate column label {label:?}"));
        }
    }

    c
}

/// Parse one numeric cell, recording a message on failure.
///
/// `line` is the 1-based line number in the source text.
pub(crate) fn parse_cell(
    cell: &str,
    line: u64,
    column: &str,
    c: &mut ValidationCollector,
) -> Option<f64> {
    if cell.is_empty() {
        c.push(format!("line {line}, column {column:?}: empty cell"));
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            c.push(format!(
                "line {line}, column {column:?}: cannot parse {cell:?} as a number"
            ));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // -- ValidationCollector -------------------------------------------------

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        assert_eq!(c.len(), 2);

        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn collector_truncates_long_details() {
        let mut c = ValidationCollector::new();
        for i in 0..25 {
            c.push(format!("e{i}"));
        }
        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 25);
                assert!(details.contains("e19"));
                assert!(!details.contains("e20;"));
                assert!(details.ends_with("... and 5 more"));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn collector_merge() {
        let mut a = ValidationCollector::new();
        a.push("a");
        let mut b = ValidationCollector::new();
        b.push("b");
        a.merge(b);
        assert_eq!(a.len(), 2);
    }

    // -- validate_header -----------------------------------------------------

    #[test]
    fn header_ok() {
        assert!(validate_header(&labels(&["Year", "A", "B"])).is_empty());
    }

    #[test]
    fn header_missing() {
        let c = validate_header(&[]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn header_blank_and_duplicate() {
        let c = validate_header(&labels(&["Year", "", "A", "A"]));
        assert_eq!(c.len(), 2);
        match c.finish().unwrap_err() {
            IoError::Validation { details, .. } => {
                assert!(details.contains("blank column label at position 2"));
                assert!(details.contains("duplicate column label \"A\""));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    // -- parse_cell ----------------------------------------------------------

    #[test]
    fn parse_cell_ok() {
        let mut c = ValidationCollector::new();
        assert_eq!(parse_cell("0.25", 2, "A", &mut c), Some(0.25));
        assert_eq!(parse_cell("1e-3", 2, "A", &mut c), Some(0.001));
        assert!(c.is_empty());
    }

    #[test]
    fn parse_cell_failures() {
        let mut c = ValidationCollector::new();
        assert_eq!(parse_cell("", 3, "A", &mut c), None);
        assert_eq!(parse_cell("12%", 4, "B", &mut c), None);
        assert_eq!(c.len(), 2);
        match c.finish().unwrap_err() {
            IoError::Validation { details, .. } => {
                assert!(details.contains("line 3, column \"A\": empty cell"));
                assert!(details.contains("line 4, column \"B\": cannot parse \"12%\""));
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }
}
