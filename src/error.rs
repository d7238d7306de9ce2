// =============================================================================
// Engine error types
// =============================================================================
//
// Calculators fail only on preconditions: too few samples or a zero period.
// Degenerate numeric inputs (flat series, zero volume) are not errors; each
// calculator substitutes a neutral value instead.

use thiserror::Error;

/// Precondition failures raised by the indicator calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data for {indicator}: need at least {required} samples, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("invalid period for {indicator}: {period}")]
    InvalidPeriod { indicator: &'static str, period: usize },
}

impl IndicatorError {
    /// Fail with `InsufficientData` unless `actual >= required`.
    pub(crate) fn require(indicator: &'static str, required: usize, actual: usize) -> Result<()> {
        if actual < required {
            return Err(Self::InsufficientData {
                indicator,
                required,
                actual,
            });
        }
        Ok(())
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, IndicatorError>;
