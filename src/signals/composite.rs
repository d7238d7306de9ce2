// =============================================================================
// Composite Scorer — fixed-weight blend of the five indicators
// =============================================================================
//
//   signal_strength    = 0.4 * MACD + 0.3 * RSI + 0.3 * ROC
//   overall_confidence = 0.6 * signal_strength + 0.2 * volume + 0.2 * trend
//
// Both scores are derived on demand from the stored indicator results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis_config::IndicatorPeriods;
use crate::error::Result;
use crate::indicators::{Indicator, Macd, Roc, Rsi, TrendMetrics, TrendType, VolumeMetrics};

const MACD_WEIGHT: f64 = 0.4;
const RSI_WEIGHT: f64 = 0.3;
const ROC_WEIGHT: f64 = 0.3;

const SIGNAL_WEIGHT: f64 = 0.6;
const VOLUME_WEIGHT: f64 = 0.2;
const TREND_WEIGHT: f64 = 0.2;

/// All five indicator results for one price / volume series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub macd: Macd,
    pub rsi: Rsi,
    pub roc: Roc,
    pub volume_metrics: VolumeMetrics,
    pub trend_metrics: TrendMetrics,
}

impl TechnicalIndicators {
    /// Run every calculator over `prices` and `volumes`.
    ///
    /// Fails with the first precondition error; the caller decides whether that
    /// makes the whole series unavailable.
    pub fn calculate(prices: &[f64], volumes: &[u64], periods: &IndicatorPeriods) -> Result<Self> {
        let indicators = Self {
            macd: Macd::calculate(prices, periods)?,
            rsi: Rsi::calculate(prices, periods)?,
            roc: Roc::calculate(prices, periods)?,
            volume_metrics: VolumeMetrics::calculate(volumes)?,
            trend_metrics: TrendMetrics::calculate(prices)?,
        };

        debug!(
            samples = prices.len(),
            rsi = format!("{:.2}", indicators.rsi.value),
            trend = %indicators.trend_metrics.trend_type,
            confidence = format!("{:.3}", indicators.overall_confidence()),
            "technical indicators computed"
        );

        Ok(indicators)
    }

    /// Momentum blend of MACD, RSI and ROC strengths.
    pub fn signal_strength(&self) -> f64 {
        self.macd.strength() * MACD_WEIGHT
            + self.rsi.strength() * RSI_WEIGHT
            + self.roc.strength() * ROC_WEIGHT
    }

    /// Signal strength blended with volume and trend strengths.
    pub fn overall_confidence(&self) -> f64 {
        self.signal_strength() * SIGNAL_WEIGHT
            + self.volume_metrics.strength() * VOLUME_WEIGHT
            + self.trend_metrics.strength() * TREND_WEIGHT
    }

    pub fn trend_type(&self) -> TrendType {
        self.trend_metrics.trend_type
    }
}

/// Serializable snapshot including the derived scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub macd: f64,
    pub macd_strength: f64,
    pub rsi: f64,
    pub rsi_strength: f64,
    pub roc: f64,
    pub roc_strength: f64,
    pub volume_strength: f64,
    pub is_high_volume: bool,
    pub trend: TrendType,
    pub trend_strength: f64,
    pub signal_strength: f64,
    pub overall_confidence: f64,
}

impl From<&TechnicalIndicators> for IndicatorSummary {
    fn from(ti: &TechnicalIndicators) -> Self {
        Self {
            macd: ti.macd.value(),
            macd_strength: ti.macd.strength(),
            rsi: ti.rsi.value,
            rsi_strength: ti.rsi.strength(),
            roc: ti.roc.value,
            roc_strength: ti.roc.strength(),
            volume_strength: ti.volume_metrics.strength(),
            is_high_volume: ti.volume_metrics.is_high_volume,
            trend: ti.trend_metrics.trend_type,
            trend_strength: ti.trend_metrics.strength,
            signal_strength: ti.signal_strength(),
            overall_confidence: ti.overall_confidence(),
        }
    }
}
