// =============================================================================
// Time Frames
// =============================================================================
//
// The closed set of aggregation buckets used by the multi-timeframe analysis.
// Each carries a label, a bucket width in seconds, and a fixed weight in the
// overall-strength average:
//
//   M1 0.05 | M5 0.10 | M15 0.15 | M30 0.15 | H1 0.20 | H4 0.15 | D1 0.10 | W1 0.10
//
// The derived `Ord` follows declaration order, which is the canonical
// iteration order everywhere a map is keyed by time frame.

use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::types::PriceSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
}

impl TimeFrame {
    /// Every time frame in canonical (shortest first) order.
    pub const ALL: [TimeFrame; 8] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D1,
        Self::W1,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::W1 => "1w",
        }
    }

    /// Bucket width in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            Self::M1 => 60,
            Self::M5 => 300,
            Self::M15 => 900,
            Self::M30 => 1_800,
            Self::H1 => 3_600,
            Self::H4 => 14_400,
            Self::D1 => 86_400,
            Self::W1 => 604_800,
        }
    }

    pub fn millis(self) -> i64 {
        self.seconds() * 1_000
    }

    /// Weight of this time frame in the overall-strength average.
    pub fn weight(self) -> f64 {
        match self {
            Self::M1 => 0.05,
            Self::M5 => 0.10,
            Self::M15 => 0.15,
            Self::M30 => 0.15,
            Self::H1 => 0.20,
            Self::H4 => 0.15,
            Self::D1 => 0.10,
            Self::W1 => 0.10,
        }
    }

    pub fn from_label(label: &str) -> anyhow::Result<Self> {
        match Self::ALL.iter().find(|tf| tf.label() == label) {
            Some(tf) => Ok(*tf),
            None => bail!("invalid timeframe: {label}"),
        }
    }

    /// Resample a chronological history into this time frame's buckets.
    ///
    /// A new bucket starts when a sample's `high_timestamp` is more than one
    /// bucket width past the start of the current bucket; the new bucket then
    /// starts at that sample.  Each bucket is represented by the mean of its
    /// prices.  Input order is trusted, never re-sorted.
    pub fn resample(self, history: &[PriceSample]) -> Vec<f64> {
        let Some(first) = history.first() else {
            return Vec::new();
        };

        let interval = self.millis();
        let mut bucket_start = first.high_timestamp;
        let mut bucket: Vec<f64> = Vec::new();
        let mut aggregated = Vec::new();

        for sample in history {
            if sample.high_timestamp.saturating_sub(bucket_start) > interval {
                if !bucket.is_empty() {
                    aggregated.push(bucket_mean(&bucket));
                    bucket.clear();
                }
                bucket_start = sample.high_timestamp;
            }
            bucket.push(sample.price());
        }

        if !bucket.is_empty() {
            aggregated.push(bucket_mean(&bucket));
        }

        aggregated
    }
}

fn bucket_mean(prices: &[f64]) -> f64 {
    prices.iter().sum::<f64>() / prices.len() as f64
}

impl FromStr for TimeFrame {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(price: f64, ts: i64) -> PriceSample {
        PriceSample::new(price, price, ts, ts)
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = TimeFrame::ALL.iter().map(|tf| tf.weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn canonical_order() {
        let mut shuffled = vec![TimeFrame::W1, TimeFrame::M1, TimeFrame::H1, TimeFrame::M15];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![TimeFrame::M1, TimeFrame::M15, TimeFrame::H1, TimeFrame::W1]
        );
    }

    #[test]
    fn label_roundtrip() {
        for tf in TimeFrame::ALL {
            assert_eq!(TimeFrame::from_label(tf.label()).unwrap(), tf);
            assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
        }
        assert!(TimeFrame::from_label("2h").is_err());
    }

    #[test]
    fn resample_empty_history() {
        assert!(TimeFrame::M1.resample(&[]).is_empty());
    }

    #[test]
    fn resample_averages_each_bucket() {
        // One-minute buckets: samples 0s, 30s, 60s share a bucket (60s is not
        // *more* than a minute past 0s); 61s opens the next one.
        let history = vec![
            sample(10.0, 0),
            sample(20.0, 30_000),
            sample(30.0, 60_000),
            sample(40.0, 61_000),
            sample(50.0, 100_000),
            sample(60.0, 200_000),
        ];
        let buckets = TimeFrame::M1.resample(&history);
        assert_eq!(buckets, vec![20.0, 45.0, 60.0]);
    }

    #[test]
    fn resample_wide_frame_collapses_history() {
        let history: Vec<PriceSample> = (0..10).map(|i| sample(i as f64, i * 60_000)).collect();
        assert_eq!(TimeFrame::W1.resample(&history), vec![4.5]);
        assert_eq!(TimeFrame::M1.resample(&history).len(), 5);
    }

    #[test]
    fn resample_tolerates_extreme_timestamps() {
        let history = vec![sample(1.0, i64::MIN), sample(2.0, i64::MAX), sample(3.0, 0)];
        assert_eq!(TimeFrame::M1.resample(&history), vec![1.0, 5.0 / 2.0]);
    }
}
