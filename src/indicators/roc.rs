// =============================================================================
// Rate of Change (ROC) — Momentum Indicator
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC = ((close - close_n) / close_n) * 100
//
// Strength normalises the latest ROC by twice the spread of the last `period`
// ROC values and squashes it through a sigmoid; a flat ROC window is 0.5.

use serde::{Deserialize, Serialize};

use super::series::{sigmoid, standard_deviation};
use super::Indicator;
use crate::analysis_config::IndicatorPeriods;
use crate::error::{IndicatorError, Result};

/// ROC history for one price series.
///
/// `history` has one slot per input price; slots before `period` hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roc {
    pub value: f64,
    pub history: Vec<f64>,
    pub period: usize,
}

impl Roc {
    /// Compute ROC over `prices` with the configured look-back.
    pub fn calculate(prices: &[f64], periods: &IndicatorPeriods) -> Result<Self> {
        Self::with_period(prices, periods.roc_period)
    }

    /// Compute ROC over `prices` with an explicit look-back `period`.
    ///
    /// A zero reference price contributes a ROC of 0.
    pub fn with_period(prices: &[f64], period: usize) -> Result<Self> {
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod {
                indicator: "roc",
                period,
            });
        }
        IndicatorError::require("roc", period + 1, prices.len())?;

        let mut history = vec![0.0; prices.len()];
        for i in period..prices.len() {
            let prev = prices[i - period];
            history[i] = if prev == 0.0 {
                0.0
            } else {
                ((prices[i] - prev) / prev) * 100.0
            };
        }

        Ok(Self {
            value: history[history.len() - 1],
            history,
            period,
        })
    }
}

impl Indicator for Roc {
    fn value(&self) -> f64 {
        self.value
    }

    fn history(&self) -> &[f64] {
        &self.history
    }

    fn strength(&self) -> f64 {
        let start = self.history.len().saturating_sub(self.period);
        let std_dev = standard_deviation(&self.history[start..]);
        if std_dev == 0.0 {
            return 0.5;
        }
        sigmoid(self.value / (2.0 * std_dev))
    }
}
