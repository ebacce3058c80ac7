//! Labelled estimator output.

use serde::Serialize;

use crate::state::AssignmentMode;
use crate::transition::{TransitionCounts, TransitionMatrix};

/// The estimator's final artifact: a TPM with state labels on both axes.
///
/// Row `i` and column `j` are labelled `labels[i]` and `labels[j]`. The raw
/// counts are kept alongside so callers can tell a degenerate row (no
/// evidence at all) from a row of genuine zero probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMatrix {
    labels: Vec<String>,
    mode: AssignmentMode,
    n_periods: usize,
    counts: TransitionCounts,
    #[serde(flatten)]
    matrix: TransitionMatrix,
}

impl LabeledMatrix {
    pub(crate) fn new(
        labels: Vec<String>,
        mode: AssignmentMode,
        n_periods: usize,
        counts: TransitionCounts,
        matrix: TransitionMatrix,
    ) -> Self {
        debug_assert_eq!(labels.len(), matrix.n_states());
        debug_assert_eq!(labels.len(), counts.n_states());
        Self {
            labels,
            mode,
            n_periods,
            counts,
            matrix,
        }
    }

    /// State labels in state-index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Assignment strategy that produced this matrix.
    pub fn mode(&self) -> AssignmentMode {
        self.mode
    }

    /// Number of periods in the input sequence (T).
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Number of states (N).
    pub fn n_states(&self) -> usize {
        self.labels.len()
    }

    /// Raw aggregated transition evidence.
    pub fn counts(&self) -> &TransitionCounts {
        &self.counts
    }

    /// The row-normalised transition probability matrix.
    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Iterates `(label, probability row)` pairs in state order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.labels
            .iter()
            .zip(self.matrix.probs())
            .map(|(label, row)| (label.as_str(), row.as_slice()))
    }

    /// Probability of moving between two states given by label.
    ///
    /// Returns `None` if either label is unknown.
    pub fn prob_by_label(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == from)?;
        let j = self.labels.iter().position(|l| l == to)?;
        Some(self.matrix.prob(i, j))
    }

    /// Labels of states with no outgoing evidence.
    pub fn degenerate_labels(&self) -> Vec<&str> {
        self.matrix
            .degenerate_rows()
            .iter()
            .map(|&i| self.labels[i].as_str())
            .collect()
    }
}
