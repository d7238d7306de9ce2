// =============================================================================
// Chart Pattern Recognition
// =============================================================================
//
// A fixed set of detectors scans a flat price series.  Each detector reports
// at most one pattern; the recognizer keeps those whose reliability clears the
// configured floor.  Only the double top / double bottom detectors carry real
// logic today; the remaining detectors are registered so new recognition can
// be added without touching the result contract.

pub mod double_extrema;
pub mod reliability;
pub mod unimplemented;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis_config::PatternConfig;

pub use double_extrema::{DoubleBottomDetector, DoubleTopDetector};
pub use unimplemented::{
    CupAndHandleDetector, FlagDetector, HeadAndShouldersDetector,
    InverseHeadAndShouldersDetector, TriangleDetector,
};

/// Every chart pattern the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternType {
    DoubleTop,
    DoubleBottom,
    HeadAndShoulders,
    InverseHeadAndShoulders,
    AscendingTriangle,
    DescendingTriangle,
    SymmetricalTriangle,
    BullishFlag,
    BearishFlag,
    CupAndHandle,
}

impl PatternType {
    /// Directional weight used by the sentiment classifier:
    /// bearish -1, bullish +1, symmetrical triangle 0, cup and handle +0.8.
    pub fn directional_bias(self) -> f64 {
        match self {
            Self::DoubleTop
            | Self::HeadAndShoulders
            | Self::DescendingTriangle
            | Self::BearishFlag => -1.0,
            Self::DoubleBottom
            | Self::InverseHeadAndShoulders
            | Self::AscendingTriangle
            | Self::BullishFlag => 1.0,
            Self::SymmetricalTriangle => 0.0,
            Self::CupAndHandle => 0.8,
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DoubleTop => "DOUBLE_TOP",
            Self::DoubleBottom => "DOUBLE_BOTTOM",
            Self::HeadAndShoulders => "HEAD_AND_SHOULDERS",
            Self::InverseHeadAndShoulders => "INVERSE_HEAD_AND_SHOULDERS",
            Self::AscendingTriangle => "ASCENDING_TRIANGLE",
            Self::DescendingTriangle => "DESCENDING_TRIANGLE",
            Self::SymmetricalTriangle => "SYMMETRICAL_TRIANGLE",
            Self::BullishFlag => "BULLISH_FLAG",
            Self::BearishFlag => "BEARISH_FLAG",
            Self::CupAndHandle => "CUP_AND_HANDLE",
        };
        f.write_str(name)
    }
}

/// A detected chart pattern spanning `start_index..=end_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePattern {
    pub pattern_type: PatternType,
    pub reliability: f64,
    pub start_index: usize,
    pub end_index: usize,
    pub target_price: f64,
    pub stop_loss: f64,
}

/// One pattern family scanned over a price series.
pub trait PatternDetector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the first pattern of this family found in `prices`, if any.
    fn detect(&self, prices: &[f64], config: &PatternConfig) -> Option<PricePattern>;
}

/// The registered detectors, in scan order.
pub fn detectors() -> [&'static dyn PatternDetector; 7] {
    [
        &DoubleTopDetector,
        &DoubleBottomDetector,
        &HeadAndShouldersDetector,
        &InverseHeadAndShouldersDetector,
        &TriangleDetector,
        &FlagDetector,
        &CupAndHandleDetector,
    ]
}

/// Run every detector over `prices` and keep the reliable patterns.
pub fn find_patterns(prices: &[f64], config: &PatternConfig) -> Vec<PricePattern> {
    if prices.len() < config.min_samples {
        return Vec::new();
    }

    detectors()
        .iter()
        .filter_map(|detector| {
            let pattern = detector.detect(prices, config)?;
            debug!(
                detector = detector.name(),
                pattern = %pattern.pattern_type,
                start = pattern.start_index,
                end = pattern.end_index,
                reliability = format!("{:.3}", pattern.reliability),
                "pattern candidate"
            );
            Some(pattern)
        })
        .filter(|pattern| pattern.reliability > config.min_reliability)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two equal peaks at 6 and 14 around a single valley at 10.
    fn double_top_series() -> Vec<f64> {
        vec![
            100.0, 100.0, 100.0, 100.0, 102.0, 105.0, 110.0, 105.0, 102.0, 100.0, 98.0, 100.0,
            102.0, 105.0, 110.0, 105.0, 102.0, 100.0, 100.0, 100.0,
        ]
    }

    #[test]
    fn short_series_has_no_patterns() {
        let prices = &double_top_series()[..19];
        assert!(find_patterns(prices, &PatternConfig::default()).is_empty());
    }

    #[test]
    fn finds_exactly_one_double_top() {
        let patterns = find_patterns(&double_top_series(), &PatternConfig::default());
        assert_eq!(patterns.len(), 1);

        let top = &patterns[0];
        assert_eq!(top.pattern_type, PatternType::DoubleTop);
        assert_eq!(top.start_index, 6);
        assert_eq!(top.end_index, 14);
        assert!(top.reliability > 0.6, "reliability {}", top.reliability);
        // neckline 98, height 12
        assert!((top.target_price - 86.0).abs() < 1e-9);
        assert!((top.stop_loss - 111.2).abs() < 1e-9);
    }

    #[test]
    fn mirrored_series_is_a_double_bottom() {
        let prices: Vec<f64> = double_top_series().iter().map(|p| 200.0 - p).collect();
        let patterns = find_patterns(&prices, &PatternConfig::default());
        assert_eq!(patterns.len(), 1);

        let bottom = &patterns[0];
        assert_eq!(bottom.pattern_type, PatternType::DoubleBottom);
        assert_eq!(bottom.start_index, 6);
        assert_eq!(bottom.end_index, 14);
        // valleys at 90, neckline 102 => height 12
        assert!((bottom.target_price - 114.0).abs() < 1e-9);
        assert!((bottom.stop_loss - 88.8).abs() < 1e-9);
    }

    #[test]
    fn raising_the_floor_filters_patterns() {
        let config = PatternConfig {
            min_reliability: 0.9,
            ..PatternConfig::default()
        };
        assert!(find_patterns(&double_top_series(), &config).is_empty());
    }

    #[test]
    fn flat_series_has_no_patterns() {
        assert!(find_patterns(&[100.0; 40], &PatternConfig::default()).is_empty());
    }

    #[test]
    fn directional_bias_table() {
        assert_eq!(PatternType::DoubleTop.directional_bias(), -1.0);
        assert_eq!(PatternType::BearishFlag.directional_bias(), -1.0);
        assert_eq!(PatternType::DoubleBottom.directional_bias(), 1.0);
        assert_eq!(PatternType::AscendingTriangle.directional_bias(), 1.0);
        assert_eq!(PatternType::SymmetricalTriangle.directional_bias(), 0.0);
        assert_eq!(PatternType::CupAndHandle.directional_bias(), 0.8);
    }

    #[test]
    fn detector_registry_names() {
        let names: Vec<&str> = detectors().iter().map(|d| d.name()).collect();
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "double_top");
        assert_eq!(names[1], "double_bottom");
    }
}
