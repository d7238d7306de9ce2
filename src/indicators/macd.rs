// =============================================================================
// Trend Convergence / Divergence (MACD)
// =============================================================================
//
//   macd_line   = EMA(fast) - EMA(slow)
//   signal_line = EMA(macd_line, signal)
//   histogram   = macd_line - signal_line
//
// All three series keep the full input length; the leading slots inherit the
// zero padding of the underlying EMAs.
//
// Strength: the spread (population σ) of the last six histogram points, signed
// by whether MACD sits above its signal line, mapped to `(σ * sign + 1) / 2`.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::series::{exponential_moving_average, standard_deviation};
use super::Indicator;
use crate::analysis_config::IndicatorPeriods;
use crate::error::{IndicatorError, Result};

/// Number of trailing histogram points used for the strength spread.
const HISTOGRAM_WINDOW: usize = 6;

/// Full MACD history for one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    /// Compute MACD over `prices` (oldest first).
    ///
    /// # Errors
    /// `InsufficientData` when `prices` is shorter than the slowest period.
    pub fn calculate(prices: &[f64], periods: &IndicatorPeriods) -> Result<Self> {
        let required = periods
            .macd_slow
            .max(periods.macd_fast)
            .max(periods.macd_signal);
        IndicatorError::require("macd", required, prices.len())?;

        let fast = exponential_moving_average(prices, periods.macd_fast)?;
        let slow = exponential_moving_average(prices, periods.macd_slow)?;
        let macd_line = subtract(&fast, &slow);
        let signal_line = exponential_moving_average(&macd_line, periods.macd_signal)?;
        let histogram = subtract(&macd_line, &signal_line);

        Ok(Self {
            macd_line,
            signal_line,
            histogram,
        })
    }

    /// Whether the MACD line currently sits above its signal line.
    pub fn is_bullish_crossover(&self) -> bool {
        match (self.macd_line.last(), self.signal_line.last()) {
            (Some(m), Some(s)) => m > s,
            _ => false,
        }
    }
}

fn subtract(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

impl Indicator for Macd {
    fn value(&self) -> f64 {
        self.macd_line.last().copied().unwrap_or(0.0)
    }

    fn history(&self) -> &[f64] {
        &self.histogram
    }

    fn strength(&self) -> f64 {
        if self.histogram.is_empty() {
            return 0.0;
        }

        let start = self.histogram.len().saturating_sub(HISTOGRAM_WINDOW);
        let histogram_trend = standard_deviation(&self.histogram[start..]);
        let crossover = if self.is_bullish_crossover() { 1.0 } else { -1.0 };

        ((histogram_trend * crossover + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn macd_insufficient_data() {
        let periods = IndicatorPeriods::default();
        for n in [0, 1, 12, 25] {
            let err = Macd::calculate(&ascending(n), &periods).unwrap_err();
            assert_eq!(
                err,
                IndicatorError::InsufficientData {
                    indicator: "macd",
                    required: 26,
                    actual: n
                }
            );
        }
    }

    #[test]
    fn macd_histogram_matches_input_length() {
        let periods = IndicatorPeriods::default();
        for n in [26, 27, 40, 100] {
            let macd = Macd::calculate(&ascending(n), &periods).unwrap();
            assert_eq!(macd.histogram.len(), n);
            assert_eq!(macd.macd_line.len(), n);
            assert_eq!(macd.signal_line.len(), n);
        }
    }

    #[test]
    fn macd_flat_series_is_neutral() {
        let macd = Macd::calculate(&vec![50.0; 300], &IndicatorPeriods::default()).unwrap();
        // Flat prices: both EMAs equal the price once seeded, so the MACD line
        // is zero and the signal line decays towards it from the padding bump.
        assert!(macd.value().abs() < 1e-10);
        assert!((macd.strength() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn macd_strength_in_unit_range() {
        let prices: Vec<f64> = (0..80)
            .map(|i| 100.0 + 20.0 * ((i as f64) / 3.0).sin())
            .collect();
        let macd = Macd::calculate(&prices, &IndicatorPeriods::default()).unwrap();
        let s = macd.strength();
        assert!((0.0..=1.0).contains(&s), "strength {s}");
    }

    #[test]
    fn macd_custom_periods() {
        let periods = IndicatorPeriods {
            macd_fast: 3,
            macd_slow: 6,
            macd_signal: 2,
            ..IndicatorPeriods::default()
        };
        let macd = Macd::calculate(&ascending(6), &periods).unwrap();
        assert_eq!(macd.histogram.len(), 6);
        assert!(Macd::calculate(&ascending(5), &periods).is_err());
    }

    #[test]
    fn macd_is_deterministic() {
        let prices: Vec<f64> = (0..50).map(|i| 10.0 + (i % 7) as f64).collect();
        let periods = IndicatorPeriods::default();
        let a = Macd::calculate(&prices, &periods).unwrap();
        let b = Macd::calculate(&prices, &periods).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.strength().to_bits(), b.strength().to_bits());
    }
}
