// =============================================================================
// Multi Time Frame Analysis
// =============================================================================
//
// Re-runs the indicator pipeline once per time frame on a resampled history
// and combines the results:
//
//   alignment        = dominant_count / frames_present       (aligned if > 0.6)
//   trend strength   = alignment * mean strength of the dominant-trend frames
//   overall strength = weighted mean confidence * (0.7 + 0.3 * trend strength)
//
// Frames whose resampled series is too short for any calculator are dropped
// from the map; that is not an error.  Frames are evaluated in parallel and
// stored in canonical M1 → W1 order, so the dominant-trend tie-break
// (first-seen frame wins) is deterministic.  Ties are not broken by trend
// ordinal: a SIDEWAYS M1 beats an UPTREND H1.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis_config::IndicatorPeriods;
use crate::indicators::TrendType;
use crate::signals::TechnicalIndicators;
use crate::timeframe::TimeFrame;
use crate::types::PriceSample;

/// Share of frames that must agree on the dominant trend to count as aligned.
const ALIGNMENT_THRESHOLD: f64 = 0.6;

/// Agreement of trend classifications across time frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAlignment {
    pub aligned: bool,
    pub strength: f64,
    pub dominant_trend: TrendType,
}

impl Default for TrendAlignment {
    fn default() -> Self {
        Self {
            aligned: false,
            strength: 0.0,
            dominant_trend: TrendType::Sideways,
        }
    }
}

impl TrendAlignment {
    /// Count trend classifications across the present frames.
    ///
    /// Ties on count go to the trend seen first in canonical frame order.
    pub fn calculate(analysis: &BTreeMap<TimeFrame, TechnicalIndicators>) -> Self {
        if analysis.is_empty() {
            return Self::default();
        }

        // (trend, count, summed strength) in first-seen order.
        let mut tallies: Vec<(TrendType, usize, f64)> = Vec::new();
        for indicators in analysis.values() {
            let trend = &indicators.trend_metrics;
            match tallies.iter_mut().find(|(t, _, _)| *t == trend.trend_type) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 += trend.strength;
                }
                None => tallies.push((trend.trend_type, 1, trend.strength)),
            }
        }

        let mut dominant = tallies[0];
        for &entry in &tallies[1..] {
            if entry.1 > dominant.1 {
                dominant = entry;
            }
        }
        let (dominant_trend, dominant_count, strength_sum) = dominant;

        let alignment_strength = dominant_count as f64 / analysis.len() as f64;
        let average_strength = strength_sum / dominant_count as f64;

        Self {
            aligned: alignment_strength > ALIGNMENT_THRESHOLD,
            strength: alignment_strength * average_strength,
            dominant_trend,
        }
    }
}

/// Indicator results per time frame plus their combined reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTimeFrameAnalysis {
    pub time_frame_analysis: BTreeMap<TimeFrame, TechnicalIndicators>,
    pub overall_strength: f64,
    pub trend_alignment: TrendAlignment,
}

impl MultiTimeFrameAnalysis {
    /// Analyze already-resampled price series, one per time frame.
    ///
    /// The volume input of each frame is its price series rounded to whole
    /// units.
    pub fn analyze(
        time_frame_prices: &BTreeMap<TimeFrame, Vec<f64>>,
        periods: &IndicatorPeriods,
    ) -> Self {
        let time_frame_analysis: BTreeMap<TimeFrame, TechnicalIndicators> = time_frame_prices
            .par_iter()
            .filter_map(|(tf, prices)| {
                let volumes: Vec<u64> = prices.iter().map(|p| p.round().max(0.0) as u64).collect();
                match TechnicalIndicators::calculate(prices, &volumes, periods) {
                    Ok(indicators) => Some((*tf, indicators)),
                    Err(e) => {
                        debug!(timeframe = %tf, points = prices.len(), error = %e, "time frame skipped");
                        None
                    }
                }
            })
            .collect();

        Self::from_indicators(time_frame_analysis)
    }

    /// Resample a chronological history into every time frame and analyze it.
    pub fn from_history(history: &[PriceSample], periods: &IndicatorPeriods) -> Self {
        let time_frame_prices: BTreeMap<TimeFrame, Vec<f64>> = TimeFrame::ALL
            .par_iter()
            .map(|tf| (*tf, tf.resample(history)))
            .filter(|(_, prices)| !prices.is_empty())
            .collect();

        Self::analyze(&time_frame_prices, periods)
    }

    /// Combine per-frame indicator results into alignment and overall strength.
    pub fn from_indicators(time_frame_analysis: BTreeMap<TimeFrame, TechnicalIndicators>) -> Self {
        let trend_alignment = TrendAlignment::calculate(&time_frame_analysis);
        let overall_strength = overall_strength(&time_frame_analysis, &trend_alignment);

        debug!(
            frames = time_frame_analysis.len(),
            dominant = %trend_alignment.dominant_trend,
            aligned = trend_alignment.aligned,
            overall_strength = format!("{:.3}", overall_strength),
            "multi time frame analysis complete"
        );

        Self {
            time_frame_analysis,
            overall_strength,
            trend_alignment,
        }
    }
}

fn overall_strength(
    analysis: &BTreeMap<TimeFrame, TechnicalIndicators>,
    alignment: &TrendAlignment,
) -> f64 {
    if analysis.is_empty() {
        return 0.0;
    }

    let (total_weight, weighted) = analysis
        .iter()
        .fold((0.0_f64, 0.0_f64), |(total, weighted), (tf, indicators)| {
            let weight = tf.weight();
            (total + weight, weighted + weight * indicators.overall_confidence())
        });

    let base = weighted / total_weight;
    base * (0.7 + 0.3 * alignment.strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    fn indicators_for(prices: &[f64]) -> TechnicalIndicators {
        let volumes = vec![10; prices.len()];
        TechnicalIndicators::calculate(prices, &volumes, &IndicatorPeriods::default()).unwrap()
    }

    #[test]
    fn empty_analysis_defaults() {
        let mta = MultiTimeFrameAnalysis::from_indicators(BTreeMap::new());
        assert_eq!(mta.overall_strength, 0.0);
        assert_eq!(mta.trend_alignment, TrendAlignment::default());
        assert!(!mta.trend_alignment.aligned);
        assert_eq!(mta.trend_alignment.dominant_trend, TrendType::Sideways);
    }

    #[test]
    fn tie_goes_to_first_frame() {
        let mut analysis = BTreeMap::new();
        analysis.insert(TimeFrame::H1, indicators_for(&linear(40, 100.0, 0.5)));
        analysis.insert(TimeFrame::M1, indicators_for(&[100.0; 40]));

        let alignment = TrendAlignment::calculate(&analysis);
        assert_eq!(alignment.dominant_trend, TrendType::Sideways);
        assert_eq!(alignment.strength, 0.0);
        assert!(!alignment.aligned);
    }

    #[test]
    fn three_uptrends_and_one_sideways_align() {
        // +0.5 % per step => UPTREND with strength 0.5; flat => SIDEWAYS.
        let up = indicators_for(&linear(40, 100.0, 0.5));
        let flat = indicators_for(&[100.0; 40]);
        assert_eq!(up.trend_type(), TrendType::Uptrend);
        assert_eq!(flat.trend_type(), TrendType::Sideways);

        let mut analysis = BTreeMap::new();
        analysis.insert(TimeFrame::M5, up.clone());
        analysis.insert(TimeFrame::M15, flat);
        analysis.insert(TimeFrame::H1, up.clone());
        analysis.insert(TimeFrame::D1, up);

        let alignment = TrendAlignment::calculate(&analysis);
        assert!(alignment.aligned);
        assert_eq!(alignment.dominant_trend, TrendType::Uptrend);
        assert!((alignment.strength - 0.75 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn split_frames_are_not_aligned() {
        let up = indicators_for(&linear(40, 100.0, 0.5));
        let down = indicators_for(&linear(40, 100.0, -0.5));
        let flat = indicators_for(&[100.0; 40]);

        let mut analysis = BTreeMap::new();
        analysis.insert(TimeFrame::M1, up.clone());
        analysis.insert(TimeFrame::M5, up);
        analysis.insert(TimeFrame::H1, down);
        analysis.insert(TimeFrame::H4, flat);

        let alignment = TrendAlignment::calculate(&analysis);
        assert_eq!(alignment.dominant_trend, TrendType::Uptrend);
        assert!(!alignment.aligned);
    }

    #[test]
    fn overall_strength_weights_and_dampens() {
        let up = indicators_for(&linear(40, 100.0, 0.5));
        let flat = indicators_for(&[100.0; 40]);

        let mut analysis = BTreeMap::new();
        analysis.insert(TimeFrame::M1, up.clone());
        analysis.insert(TimeFrame::H1, flat.clone());

        let mta = MultiTimeFrameAnalysis::from_indicators(analysis);
        let base = (0.05 * up.overall_confidence() + 0.20 * flat.overall_confidence()) / 0.25;
        let expected = base * (0.7 + 0.3 * mta.trend_alignment.strength);
        assert!((mta.overall_strength - expected).abs() < 1e-12);
    }

    #[test]
    fn short_frames_are_omitted() {
        let mut prices = BTreeMap::new();
        prices.insert(TimeFrame::M1, linear(40, 100.0, 0.5));
        prices.insert(TimeFrame::H1, linear(10, 100.0, 0.5));
        let mta = MultiTimeFrameAnalysis::analyze(&prices, &IndicatorPeriods::default());
        assert_eq!(mta.time_frame_analysis.len(), 1);
        assert!(mta.time_frame_analysis.contains_key(&TimeFrame::M1));
        assert!(mta.overall_strength > 0.0);
    }

    #[test]
    fn from_history_keeps_frames_with_enough_buckets() {
        // One sample every 61 s: every sample opens a new M1 bucket, while wider
        // frames collapse below the MACD minimum.
        let history: Vec<PriceSample> = (0..40)
            .map(|i| {
                let price = 100.0 + 0.5 * i as f64;
                PriceSample::new(price, price - 1.0, i * 61_000, i * 61_000)
            })
            .collect();
        let mta = MultiTimeFrameAnalysis::from_history(&history, &IndicatorPeriods::default());
        let frames: Vec<TimeFrame> = mta.time_frame_analysis.keys().copied().collect();
        assert_eq!(frames, vec![TimeFrame::M1]);
        assert_eq!(mta.trend_alignment.dominant_trend, TrendType::Uptrend);
        assert!(mta.trend_alignment.aligned);
    }

    #[test]
    fn analysis_is_deterministic() {
        let history: Vec<PriceSample> = (0..200)
            .map(|i| {
                let price = 50.0 + ((i as f64) / 7.0).sin() * 5.0;
                PriceSample::new(price, price - 0.5, i * 30_000, i * 30_000)
            })
            .collect();
        let periods = IndicatorPeriods::default();
        let a = MultiTimeFrameAnalysis::from_history(&history, &periods);
        let b = MultiTimeFrameAnalysis::from_history(&history, &periods);
        assert_eq!(a, b);
    }
}
