//! State assignment: how a period's value vector maps to a state.

use serde::Serialize;

/// Strategy for turning each period's values into transition evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMode {
    /// The state of a period is its dominant (largest) category.
    ///
    /// Consecutive periods contribute one whole count to
    /// `(dominant(t), dominant(t + 1))`. This is the only mode whose output
    /// is a Markov transition estimate.
    #[default]
    Dominant,
    /// Raw share vectors are used as soft contributions.
    ///
    /// Consecutive periods contribute `row_t[i] * row_{t+1}[j]` to cell
    /// `(i, j)`. This is a share-weighting shortcut and is only meaningful
    /// when each row already holds shares in `[0, 1]` summing to about 1.
    Proportional,
}

impl AssignmentMode {
    /// Short lowercase name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dominant => "dominant",
            Self::Proportional => "proportional",
        }
    }
}

/// Returns the index of the largest value in `row`.
///
/// Ties go to the lowest index. Returns `None` for an empty row. Callers are
/// expected to have rejected non-finite values already; NaN entries never
/// win a comparison.
pub fn dominant_state(row: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in row.iter().enumerate() {
        let better = match best {
            Some((_, b)) => v > b,
            None => !v.is_nan(),
        };
        if better {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_simple() {
        assert_eq!(dominant_state(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(dominant_state(&[5.0, 1.0]), Some(0));
        assert_eq!(dominant_state(&[-3.0, -1.0, -2.0]), Some(1));
    }

    #[test]
    fn dominant_tie_takes_lowest_index() {
        assert_eq!(dominant_state(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(dominant_state(&[0.1, 0.45, 0.45]), Some(1));
        assert_eq!(dominant_state(&[1.0, 1.0, 1.0, 1.0]), Some(0));
    }

    #[test]
    fn dominant_single_and_empty() {
        assert_eq!(dominant_state(&[42.0]), Some(0));
        assert_eq!(dominant_state(&[]), None);
    }

    #[test]
    fn default_mode_is_dominant() {
        assert_eq!(AssignmentMode::default(), AssignmentMode::Dominant);
    }

    #[test]
    fn mode_names() {
        assert_eq!(AssignmentMode::Dominant.as_str(), "dominant");
        assert_eq!(AssignmentMode::Proportional.as_str(), "proportional");
    }
}
