// =============================================================================
// Double Top / Double Bottom
// =============================================================================
//
// Scan left to right for the first local extremum, then keep scanning for a
// second extremum of the same kind within `max_peak_difference` of the first.
//
//   Double top:    neckline = lowest price between the peaks
//                  height   = first peak - neckline
//                  target   = neckline - height
//                  stop     = max(peaks) + 0.1 * height
//
//   Double bottom: neckline = highest price between the valleys
//                  height   = neckline - first valley
//                  target   = neckline + height
//                  stop     = min(valleys) - 0.1 * height

use super::reliability::pattern_reliability;
use super::{PatternDetector, PatternType, PricePattern};
use crate::analysis_config::PatternConfig;

/// Extra distance past the extremum for the stop-loss, as a share of height.
const STOP_BUFFER: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Peak,
    Valley,
}

impl Extremum {
    /// Strict extremum against the two neighbours on each side.
    fn is_at(self, prices: &[f64], index: usize) -> bool {
        if index < 2 || index + 2 >= prices.len() {
            return false;
        }
        let price = prices[index];
        let neighbours = [
            prices[index - 2],
            prices[index - 1],
            prices[index + 1],
            prices[index + 2],
        ];
        match self {
            Self::Peak => neighbours.iter().all(|&n| price > n),
            Self::Valley => neighbours.iter().all(|&n| price < n),
        }
    }
}

pub(crate) fn is_local_peak(prices: &[f64], index: usize) -> bool {
    Extremum::Peak.is_at(prices, index)
}

pub(crate) fn is_local_valley(prices: &[f64], index: usize) -> bool {
    Extremum::Valley.is_at(prices, index)
}

/// Indices of the first extremum and its matching twin, if both exist.
fn find_pair(prices: &[f64], kind: Extremum, config: &PatternConfig) -> Option<(usize, usize)> {
    let end = prices.len().saturating_sub(config.scan_margin);
    let mut first: Option<usize> = None;

    for i in config.scan_margin..end {
        if !kind.is_at(prices, i) {
            continue;
        }
        match first {
            None => first = Some(i),
            Some(f) => {
                let base = prices[f];
                if base == 0.0 {
                    continue;
                }
                let diff = (prices[i] - base).abs() / base.abs();
                if diff <= config.max_peak_difference {
                    return Some((f, i));
                }
            }
        }
    }
    None
}

pub struct DoubleTopDetector;

impl PatternDetector for DoubleTopDetector {
    fn name(&self) -> &'static str {
        "double_top"
    }

    fn detect(&self, prices: &[f64], config: &PatternConfig) -> Option<PricePattern> {
        if prices.len() < config.min_samples {
            return None;
        }
        let (first, second) = find_pair(prices, Extremum::Peak, config)?;

        let neckline = prices[first..=second]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let height = prices[first] - neckline;

        Some(PricePattern {
            pattern_type: PatternType::DoubleTop,
            reliability: pattern_reliability(prices, first, second),
            start_index: first,
            end_index: second,
            target_price: neckline - height,
            stop_loss: prices[first].max(prices[second]) + STOP_BUFFER * height,
        })
    }
}

pub struct DoubleBottomDetector;

impl PatternDetector for DoubleBottomDetector {
    fn name(&self) -> &'static str {
        "double_bottom"
    }

    fn detect(&self, prices: &[f64], config: &PatternConfig) -> Option<PricePattern> {
        if prices.len() < config.min_samples {
            return None;
        }
        let (first, second) = find_pair(prices, Extremum::Valley, config)?;

        let neckline = prices[first..=second]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let height = neckline - prices[first];

        Some(PricePattern {
            pattern_type: PatternType::DoubleBottom,
            reliability: pattern_reliability(prices, first, second),
            start_index: first,
            end_index: second,
            target_price: neckline + height,
            stop_loss: prices[first].min(prices[second]) - STOP_BUFFER * height,
        })
    }
}
