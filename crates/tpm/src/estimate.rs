//! End-to-end estimation: table in, labelled matrix out.

use tracing::{debug, info, warn};

use crate::columns::select_state_columns;
use crate::config::EstimatorConfig;
use crate::error::TpmError;
use crate::output::LabeledMatrix;
use crate::state::AssignmentMode;
use crate::table::ObservationTable;
use crate::transition::TransitionCounts;

/// Minimum number of periods needed to observe a transition.
const MIN_PERIODS: usize = 2;

/// Estimates a labelled transition probability matrix from a table.
///
/// Steps: select state columns, project rows onto them, aggregate
/// transitions between consecutive periods, normalise rows.
///
/// # Errors
///
/// Checked in this order:
/// - [`TpmError::EmptyData`] if the table has no rows.
/// - [`TpmError::Schema`] if no state column remains after exclusions.
/// - [`TpmError::InsufficientData`] if the table has a single row.
/// - [`TpmError::NonFiniteData`] / [`TpmError::NegativeValue`] for bad
///   state values.
pub fn estimate_tpm(
    table: &ObservationTable,
    config: &EstimatorConfig,
) -> Result<LabeledMatrix, TpmError> {
    if table.is_empty() {
        return Err(TpmError::EmptyData);
    }

    let states = select_state_columns(table.columns(), config.has_trailing_total())?;
    debug!(
        n_states = states.len(),
        trailing_total = config.has_trailing_total(),
        "selected state columns"
    );

    if table.n_periods() < MIN_PERIODS {
        return Err(TpmError::InsufficientData {
            n: table.n_periods(),
            min: MIN_PERIODS,
        });
    }

    let sequence = table.state_sequence(&states);
    estimate_from_sequence(states.into_labels(), &sequence, config.mode())
}

/// Estimates a labelled matrix from an already-selected observation sequence.
///
/// `labels` names the N states; each element of `sequence` holds one period's
/// N values in the same order.
///
/// # Errors
///
/// - [`TpmError::EmptyData`] / [`TpmError::InsufficientData`] for fewer than
///   2 periods.
/// - [`TpmError::Schema`] if `labels` is empty.
/// - [`TpmError::RaggedRow`] if a period does not have N values.
/// - [`TpmError::NonFiniteData`] for NaN or infinite values.
/// - [`TpmError::NegativeValue`] for negative values in proportional mode.
pub fn estimate_from_sequence(
    labels: Vec<String>,
    sequence: &[Vec<f64>],
    mode: AssignmentMode,
) -> Result<LabeledMatrix, TpmError> {
    if sequence.is_empty() {
        return Err(TpmError::EmptyData);
    }
    if labels.is_empty() {
        return Err(TpmError::Schema {
            n_columns: 0,
            reason: "no state labels given".to_string(),
        });
    }
    if sequence.len() < MIN_PERIODS {
        return Err(TpmError::InsufficientData {
            n: sequence.len(),
            min: MIN_PERIODS,
        });
    }
    validate_sequence(&labels, sequence, mode)?;

    let counts = TransitionCounts::accumulate(sequence, mode)?;
    let matrix = counts.normalize();

    for &i in matrix.degenerate_rows() {
        warn!(
            state = %labels[i],
            "state has no outgoing transitions; reporting a zero row"
        );
    }
    matrix.validate()?;

    info!(
        n_periods = sequence.len(),
        n_states = labels.len(),
        mode = mode.as_str(),
        total = counts.total(),
        n_degenerate = matrix.degenerate_rows().len(),
        "transition matrix estimated"
    );

    Ok(LabeledMatrix::new(
        labels,
        mode,
        sequence.len(),
        counts,
        matrix,
    ))
}

/// Checks row lengths and value domains against the state labels.
fn validate_sequence(
    labels: &[String],
    sequence: &[Vec<f64>],
    mode: AssignmentMode,
) -> Result<(), TpmError> {
    for (row, vals) in sequence.iter().enumerate() {
        if vals.len() != labels.len() {
            return Err(TpmError::RaggedRow {
                row,
                expected: labels.len(),
                got: vals.len(),
            });
        }
        for (&v, label) in vals.iter().zip(labels) {
            if !v.is_finite() {
                return Err(TpmError::NonFiniteData {
                    row,
                    column: label.clone(),
                });
            }
            if mode == AssignmentMode::Proportional && v < 0.0 {
                return Err(TpmError::NegativeValue {
                    row,
                    column: label.clone(),
                    value: v,
                });
            }
        }
    }
    Ok(())
}
