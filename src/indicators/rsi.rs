// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Split each price change into a gain or a loss.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS),  exactly 100 when avg_loss == 0
//
// Strength reads RSI as a buy signal: <= 30 (oversold) => 1.0,
// >= 70 (overbought) => 0.0, linear in between.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::analysis_config::IndicatorPeriods;
use crate::error::{IndicatorError, Result};

const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

/// RSI history for one price series.
///
/// `history` has one slot per input price; slots before `period` are unused
/// and hold `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsi {
    pub value: f64,
    pub history: Vec<f64>,
}

impl Rsi {
    /// Compute RSI over `prices` (oldest first).
    ///
    /// # Errors
    /// - `period == 0` => `InvalidPeriod`
    /// - `prices.len() < period + 1` => `InsufficientData`
    pub fn calculate(prices: &[f64], periods: &IndicatorPeriods) -> Result<Self> {
        let period = periods.rsi_period;
        if period == 0 {
            return Err(IndicatorError::InvalidPeriod {
                indicator: "rsi",
                period,
            });
        }
        IndicatorError::require("rsi", period + 1, prices.len())?;

        // --- Split price changes into gains and losses --------------------------
        let mut gains = vec![0.0; prices.len()];
        let mut losses = vec![0.0; prices.len()];
        for i in 1..prices.len() {
            let change = prices[i] - prices[i - 1];
            if change > 0.0 {
                gains[i] = change;
            } else {
                losses[i] = change.abs();
            }
        }

        // --- Seed averages with the SMA of the first `period` changes ------------
        let period_f = period as f64;
        let mut avg_gain = gains[1..=period].iter().sum::<f64>() / period_f;
        let mut avg_loss = losses[1..=period].iter().sum::<f64>() / period_f;

        let mut history = vec![0.0; prices.len()];
        history[period] = rsi_from_averages(avg_gain, avg_loss);

        // --- Wilder's smoothing for subsequent values ----------------------------
        for i in (period + 1)..prices.len() {
            avg_gain = (avg_gain * (period_f - 1.0) + gains[i]) / period_f;
            avg_loss = (avg_loss * (period_f - 1.0) + losses[i]) / period_f;
            history[i] = rsi_from_averages(avg_gain, avg_loss);
        }

        let value = history[history.len() - 1];
        Ok(Self { value, history })
    }

    /// Human-readable zone label for the latest value.
    pub fn zone(&self) -> &'static str {
        if self.value >= OVERBOUGHT {
            "OVERBOUGHT"
        } else if self.value <= OVERSOLD {
            "OVERSOLD"
        } else {
            "NEUTRAL"
        }
    }
}

impl Indicator for Rsi {
    fn value(&self) -> f64 {
        self.value
    }

    fn history(&self) -> &[f64] {
        &self.history
    }

    fn strength(&self) -> f64 {
        if self.value <= OVERSOLD {
            1.0
        } else if self.value >= OVERBOUGHT {
            0.0
        } else {
            1.0 - (self.value - OVERSOLD) / (OVERBOUGHT - OVERSOLD)
        }
    }
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn rsi(prices: &[f64]) -> Result<Rsi> {
        Rsi::calculate(prices, &IndicatorPeriods::default())
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 prices => 13 changes < 14.
        let prices: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(matches!(
            rsi(&prices),
            Err(IndicatorError::InsufficientData {
                required: 15,
                actual: 14,
                ..
            })
        ));
    }

    #[test]
    fn rsi_period_zero() {
        let periods = IndicatorPeriods {
            rsi_period: 0,
            ..IndicatorPeriods::default()
        };
        assert!(matches!(
            Rsi::calculate(&[1.0, 2.0], &periods),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn rsi_all_gains_is_exactly_100() {
        for n in [15, 16, 30] {
            let prices: Vec<f64> = (1..=n).map(|x| x as f64).collect();
            let result = rsi(&prices).unwrap();
            assert_eq!(result.value, 100.0);
            assert_eq!(result.strength(), 0.0);
            assert_eq!(result.zone(), "OVERBOUGHT");
        }
    }

    #[test]
    fn rsi_all_losses() {
        let prices: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let result = rsi(&prices).unwrap();
        assert!(result.value.abs() < 1e-10, "expected 0.0, got {}", result.value);
        assert_eq!(result.strength(), 1.0);
        assert_eq!(result.zone(), "OVERSOLD");
    }

    #[test]
    fn rsi_flat_market_has_no_losses() {
        let result = rsi(&[100.0; 30]).unwrap();
        assert_eq!(result.value, 100.0);
    }

    #[test]
    fn rsi_history_layout() {
        let prices: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let result = rsi(&prices).unwrap();
        assert_eq!(result.history.len(), 20);
        assert!(result.history[..14].iter().all(|&v| v == 0.0));
        assert_eq!(result.history[14], 100.0);
    }

    #[test]
    fn rsi_range_check() {
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89,
            46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let result = rsi(&prices).unwrap();
        for &v in &result.history {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
        let s = result.strength();
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn rsi_strength_interpolates() {
        let mid = Rsi {
            value: 50.0,
            history: vec![50.0],
        };
        assert!((mid.strength() - 0.5).abs() < 1e-12);
        assert_eq!(mid.zone(), "NEUTRAL");
    }
}
