//! Column selection: which table columns are states.
//!
//! The first column is always the period identifier. A trailing
//! aggregate/total column is excluded only when the caller declares it; no
//! attempt is made to detect it from names or values.

use std::ops::Range;

use crate::error::TpmError;

/// Index of the first state column; column 0 holds the period identifier.
pub const FIRST_STATE_COLUMN: usize = 1;

/// Ordered state-column labels selected from a table schema.
///
/// Position in [`labels`](Self::labels) is the state index used by every
/// matrix in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateColumns {
    labels: Vec<String>,
}

impl StateColumns {
    /// Returns the state labels in state-index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Consumes the selection and returns the labels.
    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    /// Number of states (N).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false` for a successfully selected set.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Range of the state columns within the full column list.
    pub fn column_range(&self) -> Range<usize> {
        FIRST_STATE_COLUMN..FIRST_STATE_COLUMN + self.labels.len()
    }

    /// Index of a state by its label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// Selects the state columns from a table's column labels.
///
/// `columns` is the full header in original order. Column 0 is dropped as the
/// period identifier; the last column is dropped too when
/// `has_trailing_total` is set.
///
/// # Errors
///
/// Returns [`TpmError::Schema`] if no state column remains.
pub fn select_state_columns<S: AsRef<str>>(
    columns: &[S],
    has_trailing_total: bool,
) -> Result<StateColumns, TpmError> {
    let n_columns = columns.len();
    let excluded = FIRST_STATE_COLUMN + usize::from(has_trailing_total);

    if n_columns <= excluded {
        let reason = if has_trailing_total {
            "no state columns remain after excluding the period and trailing total columns"
        } else {
            "no state columns remain after excluding the period column"
        };
        return Err(TpmError::Schema {
            n_columns,
            reason: reason.to_string(),
        });
    }

    let end = n_columns - usize::from(has_trailing_total);
    let labels = columns[FIRST_STATE_COLUMN..end]
        .iter()
        .map(|c| c.as_ref().to_string())
        .collect();

    Ok(StateColumns { labels })
}
