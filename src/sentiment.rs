// =============================================================================
// Market Sentiment Classifier
// =============================================================================
//
// Folds volatility, momentum, volume profile and detected chart patterns into
// a score in [-1, 1], then buckets it into one of five levels.
//
// Score pipeline:
//
//   1. score  = momentum           (0.5 * ret5 + 0.3 * ret10 + 0.2 * ret20)
//   2. score *= max(0, 1 - 2 * volatility)   (annualised σ of log returns)
//   3. score *= 1 + 0.5 * volume_profile     ((last - mean) / mean)
//   4. score += 0.3 * mean(reliability * directional bias) over patterns
//   5. clamp to [-1, 1]
//
// Buckets (first match wins):
//
//   score < -0.6 => VERY_BEARISH
//   score < -0.2 => BEARISH
//   score <  0.2 => NEUTRAL
//   score <  0.6 => BULLISH
//   otherwise    => VERY_BULLISH

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis_config::AnalysisConfig;
use crate::indicators::series::{mean, standard_deviation};
use crate::patterns::PricePattern;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Volume profile needs at least this many volume samples.
const MIN_VOLUME_SAMPLES: usize = 5;

const PATTERN_WEIGHT: f64 = 0.3;

// =============================================================================
// Types
// =============================================================================

/// Five-level market sentiment scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLevel {
    VeryBearish,
    Bearish,
    Neutral,
    Bullish,
    VeryBullish,
}

impl SentimentLevel {
    pub fn from_score(score: f64) -> Self {
        if score < -0.6 {
            Self::VeryBearish
        } else if score < -0.2 {
            Self::Bearish
        } else if score < 0.2 {
            Self::Neutral
        } else if score < 0.6 {
            Self::Bullish
        } else {
            Self::VeryBullish
        }
    }
}

impl std::fmt::Display for SentimentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryBearish => write!(f, "VERY_BEARISH"),
            Self::Bearish => write!(f, "BEARISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Bullish => write!(f, "BULLISH"),
            Self::VeryBullish => write!(f, "VERY_BULLISH"),
        }
    }
}

/// Sentiment reading plus every contributing feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub level: SentimentLevel,
    /// Magnitude of the clamped sentiment score, in [0, 1].
    pub strength: f64,
    pub volatility: f64,
    pub momentum: f64,
    pub volume_profile: f64,
    pub patterns: Vec<PricePattern>,
}

impl Default for MarketSentiment {
    fn default() -> Self {
        Self {
            level: SentimentLevel::Neutral,
            strength: 0.0,
            volatility: 0.0,
            momentum: 0.0,
            volume_profile: 0.0,
            patterns: Vec::new(),
        }
    }
}

// =============================================================================
// Analysis
// =============================================================================

impl MarketSentiment {
    /// Classify sentiment for a chronological price / volume series.
    ///
    /// Series shorter than `config.sentiment_min_samples` get the neutral
    /// default regardless of content.
    pub fn analyze(
        prices: &[f64],
        volumes: &[u64],
        patterns: Vec<PricePattern>,
        config: &AnalysisConfig,
    ) -> Self {
        if prices.len() < config.sentiment_min_samples {
            debug!(samples = prices.len(), "sentiment: insufficient data, neutral default");
            return Self::default();
        }

        let volatility = volatility(prices);
        let momentum = momentum(prices);
        let volume_profile = volume_profile(volumes);
        let score = sentiment_score(volatility, momentum, volume_profile, &patterns);
        let level = SentimentLevel::from_score(score);

        debug!(
            level = %level,
            score = format!("{:.4}", score),
            volatility = format!("{:.4}", volatility),
            momentum = format!("{:.4}", momentum),
            volume_profile = format!("{:.4}", volume_profile),
            patterns = patterns.len(),
            "sentiment classified"
        );

        Self {
            level,
            strength: score.abs(),
            volatility,
            momentum,
            volume_profile,
            patterns,
        }
    }
}

/// Annualised population σ of log returns.  Steps involving a non-positive
/// price are skipped.
pub fn volatility(prices: &[f64]) -> f64 {
    let returns: Vec<f64> = prices
        .windows(2)
        .filter(|w| w[0] > 0.0 && w[1] > 0.0)
        .map(|w| (w[1] / w[0]).ln())
        .collect();
    standard_deviation(&returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Weighted blend of the 5, 10 and 20 sample returns.
pub fn momentum(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    period_return(prices, 5) * 0.5 + period_return(prices, 10) * 0.3 + period_return(prices, 20) * 0.2
}

/// Return from `period` samples back (or the first sample) to the last one.
fn period_return(prices: &[f64], period: usize) -> f64 {
    let start_price = prices[prices.len().saturating_sub(period)];
    let end_price = prices[prices.len() - 1];
    if start_price == 0.0 {
        return 0.0;
    }
    (end_price - start_price) / start_price
}

/// Relative deviation of the last volume from the series mean.
///
/// 0 with fewer than five samples or a zero mean.
pub fn volume_profile(volumes: &[u64]) -> f64 {
    if volumes.len() < MIN_VOLUME_SAMPLES {
        return 0.0;
    }
    let values: Vec<f64> = volumes.iter().map(|&v| v as f64).collect();
    let avg = mean(&values);
    if avg == 0.0 {
        return 0.0;
    }
    (values[values.len() - 1] - avg) / avg
}

fn sentiment_score(
    volatility: f64,
    momentum: f64,
    volume_profile: f64,
    patterns: &[PricePattern],
) -> f64 {
    let mut score = momentum;
    score *= (1.0 - volatility * 2.0).max(0.0);
    score *= 1.0 + volume_profile * 0.5;

    if !patterns.is_empty() {
        let adjustment = patterns
            .iter()
            .map(|p| p.reliability * p.pattern_type.directional_bias())
            .sum::<f64>()
            / patterns.len() as f64;
        score += adjustment * PATTERN_WEIGHT;
    }

    score.clamp(-1.0, 1.0)
}
