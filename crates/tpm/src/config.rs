//! Configuration for transition matrix estimation.

use crate::state::AssignmentMode;

/// Configuration for [`estimate_tpm`](crate::estimate_tpm).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use sojourn_tpm::{AssignmentMode, EstimatorConfig};
///
/// let config = EstimatorConfig::new()
///     .with_trailing_total(true)
///     .with_mode(AssignmentMode::Proportional);
/// assert!(config.has_trailing_total());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EstimatorConfig {
    has_trailing_total: bool,
    mode: AssignmentMode,
}

impl EstimatorConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: no trailing total column, [`AssignmentMode::Dominant`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares whether the last column is an aggregate rather than a state.
    pub fn with_trailing_total(mut self, has_trailing_total: bool) -> Self {
        self.has_trailing_total = has_trailing_total;
        self
    }

    /// Sets the state assignment strategy.
    pub fn with_mode(mut self, mode: AssignmentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns whether the last column is excluded as a total.
    pub fn has_trailing_total(&self) -> bool {
        self.has_trailing_total
    }

    /// Returns the state assignment strategy.
    pub fn mode(&self) -> AssignmentMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EstimatorConfig::new();
        assert!(!cfg.has_trailing_total());
        assert_eq!(cfg.mode(), AssignmentMode::Dominant);
    }

    #[test]
    fn builder_chaining() {
        let cfg = EstimatorConfig::new()
            .with_trailing_total(true)
            .with_mode(AssignmentMode::Proportional);
        assert!(cfg.has_trailing_total());
        assert_eq!(cfg.mode(), AssignmentMode::Proportional);
    }
}
