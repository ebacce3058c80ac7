//! Error types for the sojourn-tpm crate.

/// Error type for all fallible operations in the sojourn-tpm crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TpmError {
    /// Returned when the observation table has no rows.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when there are too few periods to form a transition.
    #[error("insufficient data: got {n} periods, need at least {min}")]
    InsufficientData {
        /// Number of periods provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when no state column remains after exclusions.
    #[error("schema error ({n_columns} columns): {reason}")]
    Schema {
        /// Number of columns in the table, including excluded ones.
        n_columns: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when two columns share the same label.
    #[error("duplicate column label: {label:?}")]
    DuplicateColumn {
        /// The repeated label.
        label: String,
    },

    /// Returned when a row does not have one value per column.
    #[error("row {row} has {got} values, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        got: usize,
    },

    /// Returned when a state value is NaN or infinite.
    #[error("non-finite value at row {row}, column {column:?}")]
    NonFiniteData {
        /// Zero-based row index.
        row: usize,
        /// Label of the offending column.
        column: String,
    },

    /// Returned when proportional mode sees a negative share.
    #[error("negative value {value} at row {row}, column {column:?}")]
    NegativeValue {
        /// Zero-based row index.
        row: usize,
        /// Label of the offending column.
        column: String,
        /// The negative value.
        value: f64,
    },

    /// Returned when a transition matrix is not row-stochastic.
    #[error("invalid transition matrix: {reason}")]
    InvalidMatrix {
        /// Description of the problem.
        reason: String,
    },
}
