// =============================================================================
// Registered detectors without recognition logic yet
// =============================================================================
//
// These families are part of the pattern vocabulary (and of the sentiment
// bias table) but never report a match.  Filling one in only means replacing
// its `detect` body.

use super::{PatternDetector, PricePattern};
use crate::analysis_config::PatternConfig;

macro_rules! not_found_detector {
    ($detector:ident, $name:literal) => {
        pub struct $detector;

        impl PatternDetector for $detector {
            fn name(&self) -> &'static str {
                $name
            }

            fn detect(&self, _prices: &[f64], _config: &PatternConfig) -> Option<PricePattern> {
                None
            }
        }
    };
}

not_found_detector!(HeadAndShouldersDetector, "head_and_shoulders");
not_found_detector!(InverseHeadAndShouldersDetector, "inverse_head_and_shoulders");
// Ascending, descending and symmetrical triangles.
not_found_detector!(TriangleDetector, "triangle");
// Bullish and bearish flags.
not_found_detector!(FlagDetector, "flag");
not_found_detector!(CupAndHandleDetector, "cup_and_handle");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_never_match() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + ((i as f64) / 3.0).sin() * 10.0).collect();
        let config = PatternConfig::default();
        let detectors: [&dyn PatternDetector; 5] = [
            &HeadAndShouldersDetector,
            &InverseHeadAndShouldersDetector,
            &TriangleDetector,
            &FlagDetector,
            &CupAndHandleDetector,
        ];
        for detector in detectors {
            assert!(detector.detect(&prices, &config).is_none(), "{}", detector.name());
        }
    }
}
