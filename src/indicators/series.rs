// =============================================================================
// Series Utilities
// =============================================================================
//
// Numeric helpers shared by every calculator:
//   - EMA seeded with the SMA of the first `period` values
//       multiplier = 2 / (period + 1)
//       EMA_t      = (value_t - EMA_{t-1}) * multiplier + EMA_{t-1}
//   - population mean / standard deviation over an explicit window
//   - ordinary least squares (slope, intercept, R²)
//   - logistic sigmoid used to squash unbounded scores into (0, 1)
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// Compute the EMA of `values` for the given look-back `period`.
///
/// The output has the same length as the input so that it lines up index for
/// index with the source series. Slots before `period - 1` are unused and hold
/// `0.0`; index `period - 1` holds the SMA seed.
///
/// # Errors
/// - `period == 0` => `InvalidPeriod`
/// - `values.len() < period` => `InsufficientData`
pub fn exponential_moving_average(values: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            indicator: "ema",
            period,
        });
    }
    IndicatorError::require("ema", period, values.len())?;

    let multiplier = 2.0 / (period + 1) as f64;
    let mut ema = vec![0.0; values.len()];

    // Seed: SMA of the first `period` values.
    ema[period - 1] = values[..period].iter().sum::<f64>() / period as f64;

    for i in period..values.len() {
        ema[i] = (values[i] - ema[i - 1]) * multiplier + ema[i - 1];
    }

    Ok(ema)
}

/// Arithmetic mean of `window`; `0.0` for an empty slice.
pub fn mean(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Population standard deviation of `window`; `0.0` for an empty slice.
pub fn standard_deviation(window: &[f64]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let avg = mean(window);
    let variance = window.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

/// Logistic sigmoid `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Result of an ordinary least squares fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fit `ys` against `xs` by ordinary least squares.
///
/// Pairs beyond the shorter of the two slices are ignored.
///
/// # Edge cases
/// - fewer than 2 pairs => `InsufficientData`
/// - all `xs` equal => slope 0, intercept = mean(ys), R² 0
/// - all `ys` equal => R² 0 (nothing to explain)
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<Regression> {
    let n = xs.len().min(ys.len());
    IndicatorError::require("linear regression", 2, n)?;

    let (xs, ys) = (&xs[..n], &ys[..n]);
    let x_mean = mean(xs);
    let y_mean = mean(ys);

    let (mut sxx, mut syy, mut sxy) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 {
        return Ok(Regression {
            slope: 0.0,
            intercept: y_mean,
            r_squared: 0.0,
        });
    }

    let slope = sxy / sxx;
    let r_squared = if syy == 0.0 {
        0.0
    } else {
        ((sxy * sxy) / (sxx * syy)).min(1.0)
    };

    Ok(Regression {
        slope,
        intercept: y_mean - slope * x_mean,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- exponential_moving_average --------------------------------------

    #[test]
    fn ema_period_zero() {
        assert!(matches!(
            exponential_moving_average(&[1.0, 2.0], 0),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn ema_insufficient_data() {
        assert!(matches!(
            exponential_moving_average(&[1.0, 2.0], 5),
            Err(IndicatorError::InsufficientData {
                required: 5,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn ema_period_equals_length() {
        let ema = exponential_moving_average(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[0], 0.0);
        assert_eq!(ema[1], 0.0);
        assert!((ema[2] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // SMA of first 5 = 3.0, multiplier = 1/3
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ema = exponential_moving_average(&closes, 5).unwrap();
        assert_eq!(ema.len(), closes.len());

        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        assert!((ema[4] - expected).abs() < 1e-10);
        for i in 5..closes.len() {
            expected = (closes[i] - expected) * mult + expected;
            assert!((ema[i] - expected).abs() < 1e-10, "index {i}");
        }
    }

    // ---- statistics ------------------------------------------------------

    #[test]
    fn stats_on_empty_window() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(standard_deviation(&[]), 0.0);
    }

    #[test]
    fn population_standard_deviation() {
        // Population variance of [2,4,4,4,5,5,7,9] is 4.
        let window = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&window) - 5.0).abs() < 1e-12);
        assert!((standard_deviation(&window) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_midpoint() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    // ---- linear_regression -----------------------------------------------

    #[test]
    fn regression_perfect_line() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 + 2.0 * x).collect();
        let fit = linear_regression(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 3.0).abs() < 1e-10);
        assert!((fit.r_squared - 1.0).abs() < 1e-10);
    }

    #[test]
    fn regression_flat_series_has_zero_r_squared() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [5.0; 4];
        let fit = linear_regression(&xs, &ys).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn regression_needs_two_points() {
        assert!(linear_regression(&[1.0], &[1.0]).is_err());
    }
}
