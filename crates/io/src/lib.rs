//! # sojourn-io
//!
//! Read per-period category tables from delimited text and write estimated
//! transition matrices back out as delimited text or JSON. Bridges external
//! files into the `sojourn-tpm` types.

mod error;
mod matrix;
mod reader;
mod validate;
mod writer;

pub use error::IoError;
pub use matrix::{MatrixTable, read_matrix, read_matrix_from};
pub use reader::{ReaderConfig, read_table, read_table_from};
pub use writer::{OutputFormat, WriterConfig, to_json, write_matrix, write_matrix_to};
