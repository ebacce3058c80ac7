//! Empirical transition probability matrices from per-period category tables.
//!
//! Given a time-ordered table where each row holds one period's values for a
//! fixed set of competing categories (market shares of trading partners over
//! successive years, say), this crate estimates how often the system moves
//! from one category-state to another between consecutive periods, and
//! returns the result as a labelled row-stochastic matrix.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//!  │   columns    │────▶│    state     │────▶│  transition  │────▶│    output    │
//!  │  (select N)  │     │ (assign mode)│     │(count, norm.)│     │  (labelled)  │
//!  └──────────────┘     └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use sojourn_tpm::{EstimatorConfig, ObservationTable, estimate_tpm};
//!
//! let table = ObservationTable::new(
//!     vec!["Year".into(), "A".into(), "B".into()],
//!     vec!["2001".into(), "2002".into(), "2003".into()],
//!     vec![vec![0.7, 0.3], vec![0.4, 0.6], vec![0.2, 0.8]],
//! )
//! .unwrap();
//!
//! let tpm = estimate_tpm(&table, &EstimatorConfig::new()).unwrap();
//! assert_eq!(tpm.prob_by_label("A", "B"), Some(1.0));
//! assert_eq!(tpm.prob_by_label("B", "B"), Some(1.0));
//! ```

pub mod columns;
pub mod config;
pub mod error;
pub mod estimate;
pub mod output;
pub mod state;
pub mod table;
pub mod transition;

pub use columns::{FIRST_STATE_COLUMN, StateColumns, select_state_columns};
pub use config::EstimatorConfig;
pub use error::TpmError;
pub use estimate::{estimate_from_sequence, estimate_tpm};
pub use output::LabeledMatrix;
pub use state::{AssignmentMode, dominant_state};
pub use table::ObservationTable;
pub use transition::{TransitionCounts, TransitionMatrix};
