// =============================================================================
// Linear Trend Metrics
// =============================================================================
//
// Fits price against sample index by ordinary least squares and classifies the
// slope, expressed as a percentage of the first price per step:
//
//   normalized_slope >  1.0  => STRONG_UPTREND
//   normalized_slope >  0.2  => UPTREND
//   normalized_slope < -1.0  => STRONG_DOWNTREND
//   normalized_slope < -0.2  => DOWNTREND
//   otherwise                => SIDEWAYS
//
// strength = min(1, |normalized_slope| * R²)
// =============================================================================

use serde::{Deserialize, Serialize};

use super::series::linear_regression;
use super::Indicator;
use crate::error::{IndicatorError, Result};

/// Direction classification of a fitted price trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendType {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
}

impl TrendType {
    /// Classify a per-step slope given as a percentage of the first price.
    pub fn from_normalized_slope(normalized_slope: f64) -> Self {
        if normalized_slope > 1.0 {
            Self::StrongUptrend
        } else if normalized_slope > 0.2 {
            Self::Uptrend
        } else if normalized_slope < -1.0 {
            Self::StrongDowntrend
        } else if normalized_slope < -0.2 {
            Self::Downtrend
        } else {
            Self::Sideways
        }
    }

    pub fn is_bullish(self) -> bool {
        matches!(self, Self::StrongUptrend | Self::Uptrend)
    }

    pub fn is_bearish(self) -> bool {
        matches!(self, Self::StrongDowntrend | Self::Downtrend)
    }
}

impl std::fmt::Display for TrendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongUptrend => write!(f, "STRONG_UPTREND"),
            Self::Uptrend => write!(f, "UPTREND"),
            Self::Sideways => write!(f, "SIDEWAYS"),
            Self::Downtrend => write!(f, "DOWNTREND"),
            Self::StrongDowntrend => write!(f, "STRONG_DOWNTREND"),
        }
    }
}

/// Regression-based trend summary for one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendMetrics {
    pub slope: f64,
    pub r_squared: f64,
    /// Slope as a percentage of the first price, per step.
    pub normalized_slope: f64,
    pub trend_type: TrendType,
    pub strength: f64,
    pub prices: Vec<f64>,
}

impl TrendMetrics {
    /// Fit a trend over `prices` (oldest first).
    ///
    /// A zero first price yields a normalized slope of 0 (SIDEWAYS).
    ///
    /// # Errors
    /// `InsufficientData` when fewer than 2 prices are supplied.
    pub fn calculate(prices: &[f64]) -> Result<Self> {
        IndicatorError::require("trend", 2, prices.len())?;

        let xs: Vec<f64> = (0..prices.len()).map(|i| i as f64).collect();
        let fit = linear_regression(&xs, prices)?;

        let normalized_slope = if prices[0] == 0.0 {
            0.0
        } else {
            fit.slope / prices[0] * 100.0
        };
        let trend_type = TrendType::from_normalized_slope(normalized_slope);
        let strength = (normalized_slope.abs() * fit.r_squared).min(1.0);

        Ok(Self {
            slope: fit.slope,
            r_squared: fit.r_squared,
            normalized_slope,
            trend_type,
            strength,
            prices: prices.to_vec(),
        })
    }
}

impl Indicator for TrendMetrics {
    fn value(&self) -> f64 {
        self.slope
    }

    fn history(&self) -> &[f64] {
        &self.prices
    }

    fn strength(&self) -> f64 {
        self.strength
    }
}
