// =============================================================================
// Analysis Configuration — indicator periods and classification thresholds
// =============================================================================
//
// One immutable structure that every calculator receives by reference.  The
// defaults reproduce the classic constants (12/26/9 MACD, 14 RSI, 12 ROC) so a
// default-constructed config gives the reference behaviour, while tests and
// callers can substitute alternate periods without any global state.
//
// All fields carry `#[serde(default)]` so a partial (or empty) JSON file
// loads cleanly.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_rsi_period() -> usize {
    14
}

fn default_roc_period() -> usize {
    12
}

fn default_pattern_min_samples() -> usize {
    20
}

fn default_max_peak_difference() -> f64 {
    0.02
}

fn default_min_reliability() -> f64 {
    0.6
}

fn default_scan_margin() -> usize {
    5
}

fn default_sentiment_min_samples() -> usize {
    10
}

fn default_min_confidence() -> f64 {
    0.4
}

fn default_sideways_buy_confidence() -> f64 {
    0.7
}

fn default_confidence_change() -> f64 {
    0.1
}

fn default_profit_change() -> f64 {
    5.0
}

// =============================================================================
// IndicatorPeriods
// =============================================================================

/// Look-back periods for the indicator calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPeriods {
    /// Fast EMA period of the MACD line.
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    /// Slow EMA period of the MACD line; also the MACD minimum sample count.
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    /// EMA period applied to the MACD line to form the signal line.
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    /// Wilder smoothing period for RSI.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Look-back for rate of change.
    #[serde(default = "default_roc_period")]
    pub roc_period: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            rsi_period: default_rsi_period(),
            roc_period: default_roc_period(),
        }
    }
}

// =============================================================================
// PatternConfig
// =============================================================================

/// Parameters of the double top / double bottom recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Minimum series length before any detector runs.
    #[serde(default = "default_pattern_min_samples")]
    pub min_samples: usize,

    /// Maximum relative price difference between the two extrema (0.02 = 2 %).
    #[serde(default = "default_max_peak_difference")]
    pub max_peak_difference: f64,

    /// Patterns at or below this reliability are dropped.
    #[serde(default = "default_min_reliability")]
    pub min_reliability: f64,

    /// Number of samples skipped at each end of the series while scanning.
    #[serde(default = "default_scan_margin")]
    pub scan_margin: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_samples: default_pattern_min_samples(),
            max_peak_difference: default_max_peak_difference(),
            min_reliability: default_min_reliability(),
            scan_margin: default_scan_margin(),
        }
    }
}

// =============================================================================
// SuggestionConfig
// =============================================================================

/// Thresholds used when turning an analysis into a BUY / SELL / HOLD call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Below this confidence the suggestion is always HOLD.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Confidence needed to BUY into a sideways market.
    #[serde(default = "default_sideways_buy_confidence")]
    pub sideways_buy_confidence: f64,

    /// Confidence delta that makes a new suggestion worth publishing.
    #[serde(default = "default_confidence_change")]
    pub confidence_change: f64,

    /// Potential-profit delta (percentage points) worth publishing.
    #[serde(default = "default_profit_change")]
    pub profit_change: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            sideways_buy_confidence: default_sideways_buy_confidence(),
            confidence_change: default_confidence_change(),
            profit_change: default_profit_change(),
        }
    }
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Top-level configuration of the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub periods: IndicatorPeriods,

    #[serde(default)]
    pub patterns: PatternConfig,

    /// Series shorter than this get the neutral sentiment default.
    #[serde(default = "default_sentiment_min_samples")]
    pub sentiment_min_samples: usize,

    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            periods: IndicatorPeriods::default(),
            patterns: PatternConfig::default(),
            sentiment_min_samples: default_sentiment_min_samples(),
            suggestion: SuggestionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults with
    /// a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        info!(
            path = %path.display(),
            macd_slow = config.periods.macd_slow,
            rsi_period = config.periods.rsi_period,
            roc_period = config.periods.roc_period,
            "analysis config loaded"
        );

        Ok(config)
    }
}
