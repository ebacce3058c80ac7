//! In-memory observation table.

use std::collections::HashSet;

use crate::columns::{FIRST_STATE_COLUMN, StateColumns};
use crate::error::TpmError;

/// A time-ordered table of per-period category values.
///
/// Column 0 is the period identifier and is kept as text. Every other column
/// holds one numeric value per row; `values[t][c - 1]` is the value of column
/// `c` in period `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: Vec<String>,
    periods: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl ObservationTable {
    /// Builds a table, checking its shape.
    ///
    /// # Errors
    ///
    /// - [`TpmError::Schema`] if `columns` is empty.
    /// - [`TpmError::DuplicateColumn`] if two labels are equal.
    /// - [`TpmError::RaggedRow`] if the period count differs from the row
    ///   count, or a row does not have `columns.len() - 1` values.
    pub fn new(
        columns: Vec<String>,
        periods: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, TpmError> {
        if columns.is_empty() {
            return Err(TpmError::Schema {
                n_columns: 0,
                reason: "table has no columns".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for label in &columns {
            if !seen.insert(label.as_str()) {
                return Err(TpmError::DuplicateColumn {
                    label: label.clone(),
                });
            }
        }

        if periods.len() != values.len() {
            return Err(TpmError::RaggedRow {
                row: periods.len().min(values.len()),
                expected: periods.len(),
                got: values.len(),
            });
        }

        let width = columns.len() - 1;
        for (row, vals) in values.iter().enumerate() {
            if vals.len() != width {
                return Err(TpmError::RaggedRow {
                    row,
                    expected: width,
                    got: vals.len(),
                });
            }
        }

        Ok(Self {
            columns,
            periods,
            values,
        })
    }

    /// All column labels, period column first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Period identifiers, one per row.
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// Numeric values of every non-period column, one vector per row.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Number of rows (periods).
    pub fn n_periods(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Projects every row onto the selected state columns.
    ///
    /// The result is the observation sequence: `T` vectors of length `N`.
    pub fn state_sequence(&self, states: &StateColumns) -> Vec<Vec<f64>> {
        let range = states.column_range();
        let values = (range.start - FIRST_STATE_COLUMN)..(range.end - FIRST_STATE_COLUMN);
        self.values
            .iter()
            .map(|row| row[values.clone()].to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::select_state_columns;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_valid_table() {
        let table = ObservationTable::new(
            labels(&["Year", "A", "B"]),
            labels(&["2001", "2002"]),
            vec![vec![0.6, 0.4], vec![0.3, 0.7]],
        )
        .unwrap();
        assert_eq!(table.n_periods(), 2);
        assert_eq!(table.columns().len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn empty_rows_allowed() {
        let table = ObservationTable::new(labels(&["Year", "A"]), vec![], vec![]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn rejects_duplicate_labels() {
        let err = ObservationTable::new(labels(&["Year", "A", "A"]), vec![], vec![]).unwrap_err();
        assert_eq!(
            err,
            TpmError::DuplicateColumn {
                label: "A".to_string()
            }
        );
    }

    #[test]
    fn rejects_ragged_row() {
        let err = ObservationTable::new(
            labels(&["Year", "A", "B"]),
            labels(&["1", "2"]),
            vec![vec![1.0, 2.0], vec![3.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TpmError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn rejects_no_columns() {
        assert!(matches!(
            ObservationTable::new(vec![], vec![], vec![]),
            Err(TpmError::Schema { .. })
        ));
    }

    #[test]
    fn state_sequence_drops_total() {
        let table = ObservationTable::new(
            labels(&["Year", "A", "B", "Total"]),
            labels(&["1", "2"]),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 9.0]],
        )
        .unwrap();
        let states = select_state_columns(table.columns(), true).unwrap();
        assert_eq!(
            table.state_sequence(&states),
            vec![vec![1.0, 2.0], vec![4.0, 5.0]]
        );
    }
}
