//! Transition aggregation and row normalisation.

use serde::Serialize;

use crate::error::TpmError;
use crate::state::{AssignmentMode, dominant_state};

/// Tolerance for a non-degenerate row sum to count as 1.0.
const ROW_SUM_TOL: f64 = 1e-9;

/// An N x N matrix of aggregated transition evidence.
///
/// Entry `(i, j)` is the evidence of state `i` being followed by state `j`.
/// In [`AssignmentMode::Dominant`] every entry is a whole count and the total
/// is `T - 1`; in [`AssignmentMode::Proportional`] each period is rescaled
/// to shares summing to 1 and a pair of periods adds the outer product of
/// their shares, so entries are non-negative reals and the total is at most
/// `T - 1`. Periods with no positive mass contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransitionCounts {
    counts: Vec<Vec<f64>>,
}

impl TransitionCounts {
    /// An all-zero N x N count matrix.
    pub fn zeros(n_states: usize) -> Self {
        Self {
            counts: vec![vec![0.0; n_states]; n_states],
        }
    }

    /// Aggregates transitions over consecutive periods of `sequence`.
    ///
    /// Each element of `sequence` is one period's values across the N states.
    /// Values are expected to be finite (and non-negative in proportional
    /// mode); validation with column labels happens in
    /// [`estimate_from_sequence`](crate::estimate_from_sequence).
    ///
    /// # Errors
    ///
    /// - [`TpmError::EmptyData`] if `sequence` is empty.
    /// - [`TpmError::InsufficientData`] if it has fewer than 2 periods.
    /// - [`TpmError::Schema`] if the first period has no values.
    /// - [`TpmError::RaggedRow`] if periods differ in length.
    pub fn accumulate(sequence: &[Vec<f64>], mode: AssignmentMode) -> Result<Self, TpmError> {
        let first = sequence.first().ok_or(TpmError::EmptyData)?;
        if sequence.len() < 2 {
            return Err(TpmError::InsufficientData {
                n: sequence.len(),
                min: 2,
            });
        }
        let n = first.len();
        if n == 0 {
            return Err(TpmError::Schema {
                n_columns: 0,
                reason: "observation rows have no state values".to_string(),
            });
        }
        for (row, vals) in sequence.iter().enumerate() {
            if vals.len() != n {
                return Err(TpmError::RaggedRow {
                    row,
                    expected: n,
                    got: vals.len(),
                });
            }
        }

        let mut counts = Self::zeros(n);
        for pair in sequence.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            match mode {
                AssignmentMode::Dominant => {
                    if let (Some(i), Some(j)) = (dominant_state(current), dominant_state(next)) {
                        counts.counts[i][j] += 1.0;
                    }
                }
                AssignmentMode::Proportional => {
                    let (Some(current), Some(next)) = (to_shares(current), to_shares(next))
                    else {
                        continue;
                    };
                    for (i, &wi) in current.iter().enumerate() {
                        if wi == 0.0 {
                            continue;
                        }
                        for (j, &wj) in next.iter().enumerate() {
                            counts.counts[i][j] += wi * wj;
                        }
                    }
                }
            }
        }

        Ok(counts)
    }

    /// Number of states (N).
    pub fn n_states(&self) -> usize {
        self.counts.len()
    }

    /// Evidence of a transition from state `from` to state `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.counts[from][to]
    }

    /// Row `from` of the count matrix.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.counts[from]
    }

    /// All rows of the count matrix.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.counts
    }

    /// Sum of row `from`.
    pub fn row_sum(&self, from: usize) -> f64 {
        self.counts[from].iter().sum()
    }

    /// Total aggregated evidence across all cells.
    pub fn total(&self) -> f64 {
        self.counts.iter().flat_map(|row| row.iter()).sum()
    }

    /// Normalises each row into a probability distribution.
    ///
    /// Rows with a positive sum are divided by that sum. Rows whose counts
    /// sum to zero (no outgoing evidence) become all-zero rows and are
    /// recorded as degenerate on the returned matrix.
    pub fn normalize(&self) -> TransitionMatrix {
        let probs = self.counts.iter().map(|row| normalize_row(row)).collect();
        let degenerate = (0..self.n_states())
            .filter(|&i| self.row_sum(i) == 0.0)
            .collect();
        TransitionMatrix { probs, degenerate }
    }
}

/// Divides `row` by its sum, or returns zeros when the sum is not positive.
fn normalize_row(row: &[f64]) -> Vec<f64> {
    to_shares(row).unwrap_or_else(|| vec![0.0; row.len()])
}

/// Rescales a non-negative row to sum to 1, or `None` when it has no
/// positive mass.
///
/// A sum that overflows is handled by first dividing by the row maximum.
fn to_shares(row: &[f64]) -> Option<Vec<f64>> {
    let s: f64 = row.iter().sum();
    if s.is_finite() {
        return (s > 0.0).then(|| row.iter().map(|&v| v / s).collect());
    }
    let max = row.iter().copied().fold(0.0, f64::max);
    if !(max > 0.0 && max.is_finite()) {
        return None;
    }
    let scaled: Vec<f64> = row.iter().map(|&v| v / max).collect();
    let s: f64 = scaled.iter().sum();
    Some(scaled.iter().map(|&v| v / s).collect())
}

/// An N x N row-stochastic transition probability matrix.
///
/// Row `i` is the distribution over next states given current state `i`.
/// Each row sums to 1.0, except degenerate rows (state never observed as a
/// current state) which are all zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionMatrix {
    #[serde(rename = "probabilities")]
    probs: Vec<Vec<f64>>,
    #[serde(rename = "degenerate_rows")]
    degenerate: Vec<usize>,
}

impl TransitionMatrix {
    /// Constructs a transition matrix directly from rows of probabilities.
    ///
    /// Rows whose entries are all zero are marked degenerate.
    #[cfg(test)]
    fn from_probs(probs: Vec<Vec<f64>>) -> Self {
        let degenerate = probs
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|&p| p == 0.0))
            .map(|(i, _)| i)
            .collect();
        Self { probs, degenerate }
    }

    /// Number of states (N).
    pub fn n_states(&self) -> usize {
        self.probs.len()
    }

    /// Transition probabilities out of state `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.probs[from]
    }

    /// Probability of moving from state `from` to state `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn prob(&self, from: usize, to: usize) -> f64 {
        self.probs[from][to]
    }

    /// All rows of the matrix.
    pub fn probs(&self) -> &[Vec<f64>] {
        &self.probs
    }

    /// Indices of rows that had no outgoing evidence.
    pub fn degenerate_rows(&self) -> &[usize] {
        &self.degenerate
    }

    /// Returns `true` if row `from` is degenerate.
    pub fn is_degenerate(&self, from: usize) -> bool {
        self.degenerate.contains(&from)
    }

    /// Validates that the matrix is square and row-stochastic.
    ///
    /// Every value must be finite and in `[0, 1]`. Each row must sum to 1.0
    /// (tolerance: 1e-9) or be entirely zero.
    pub fn validate(&self) -> Result<(), TpmError> {
        let n = self.probs.len();
        for (i, row) in self.probs.iter().enumerate() {
            if row.len() != n {
                return Err(TpmError::InvalidMatrix {
                    reason: format!("row {i} has {} entries, expected {n}", row.len()),
                });
            }
            let mut sum = 0.0;
            for (j, &p) in row.iter().enumerate() {
                if !p.is_finite() {
                    return Err(TpmError::InvalidMatrix {
                        reason: format!("probs[{i}][{j}] is not finite: {p}"),
                    });
                }
                if !(0.0..=1.0).contains(&p) {
                    return Err(TpmError::InvalidMatrix {
                        reason: format!("probs[{i}][{j}] = {p} is outside [0, 1]"),
                    });
                }
                sum += p;
            }
            if sum != 0.0 && (sum - 1.0).abs() > ROW_SUM_TOL {
                return Err(TpmError::InvalidMatrix {
                    reason: format!("row {i} sums to {sum}, expected 1.0 or 0.0"),
                });
            }
        }
        Ok(())
    }
}
