//! Error types for sojourn-io.

use std::path::PathBuf;

use sojourn_tpm::TpmError;

/// Error type for all fallible operations in the sojourn-io crate.
///
/// Covers missing files, delimited-text parse failures, JSON encoding,
/// accumulated validation problems, and table-shape errors surfaced by the
/// estimator crate while building an observation table.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a file cannot be opened, created or written.
    #[error("i/o error on {}: {reason}", path.display())]
    File {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when writing to an output stream fails.
    #[error("write error: {reason}")]
    Write {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV reader or writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps a JSON serialization failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying serde_json failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when the parsed cells do not form a valid observation table.
    #[error("table error: {reason}")]
    Table {
        /// Description of the table-shape problem.
        reason: String,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl From<TpmError> for IoError {
    fn from(e: TpmError) -> Self {
        IoError::Table {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_file() {
        let err = IoError::File {
            path: PathBuf::from("/readonly/tpm.csv"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "i/o error on /readonly/tpm.csv: permission denied"
        );
    }

    #[test]
    fn display_write() {
        let err = IoError::Write {
            reason: "broken pipe".to_string(),
        };
        assert_eq!(err.to_string(), "write error: broken pipe");
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            reason: "unequal lengths".to_string(),
        };
        assert_eq!(err.to_string(), "csv error: unequal lengths");
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "blank column label at position 2; duplicate column label \"A\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): blank column label at position 2; duplicate column label \"A\""
        );
    }

    #[test]
    fn from_tpm_error() {
        let err: IoError = TpmError::DuplicateColumn {
            label: "A".to_string(),
        }
        .into();
        assert!(matches!(err, IoError::Table { .. }));
        assert!(err.to_string().contains("duplicate column label"));
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: IoError = json_err.into();
        assert!(matches!(err, IoError::Json { .. }));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
