// =============================================================================
// Shared types used across the analysis engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed quote for a tradable item.
///
/// Timestamps are Unix milliseconds.  `high` doubles as the reference price
/// for all indicator math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSample {
    pub high: f64,
    pub low: f64,
    #[serde(rename = "highTime")]
    pub high_timestamp: i64,
    #[serde(rename = "lowTime")]
    pub low_timestamp: i64,
}

impl PriceSample {
    pub fn new(high: f64, low: f64, high_timestamp: i64, low_timestamp: i64) -> Self {
        Self {
            high,
            low,
            high_timestamp,
            low_timestamp,
        }
    }

    /// Reference price used by the indicator calculators.
    pub fn price(&self) -> f64 {
        self.high
    }

    pub fn spread(&self) -> f64 {
        self.high - self.low
    }

    /// Spread relative to the low price; 0 when the low is not positive.
    pub fn margin(&self) -> f64 {
        if self.low > 0.0 {
            self.spread() / self.low
        } else {
            0.0
        }
    }

    pub fn margin_percent(&self) -> f64 {
        self.margin() * 100.0
    }

    /// Traded-range stand-in for volume: `|high - low|`, rounded.
    pub fn volume_proxy(&self) -> u64 {
        self.spread().abs().round() as u64
    }

    /// `high_timestamp` as a UTC date-time, if it is in range.
    pub fn high_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.high_timestamp)
    }
}

/// Reference prices of a chronological sample slice.
pub fn prices_of(history: &[PriceSample]) -> Vec<f64> {
    history.iter().map(PriceSample::price).collect()
}

/// Volume proxies of a chronological sample slice.
pub fn volumes_of(history: &[PriceSample]) -> Vec<u64> {
    history.iter().map(PriceSample::volume_proxy).collect()
}
