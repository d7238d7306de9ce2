// =============================================================================
// Analysis Service — runs the engine over one item's price history
// =============================================================================
//
// Prices are the sample highs, volumes the traded range |high - low|.  Every
// entry point degrades to "no result" instead of failing: a history too short
// for the indicators is an expected state for a freshly tracked item.

use tracing::{debug, warn};

use crate::analysis_config::AnalysisConfig;
use crate::multi_timeframe::MultiTimeFrameAnalysis;
use crate::patterns::find_patterns;
use crate::sentiment::MarketSentiment;
use crate::signals::{TechnicalIndicators, TradingSuggestion};
use crate::types::{prices_of, volumes_of, PriceSample};

#[derive(Debug, Clone, Default)]
pub struct AnalysisService {
    config: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Indicator results for the whole history, or `None` if any calculator
    /// lacks data.
    pub fn analyze(&self, history: &[PriceSample]) -> Option<TechnicalIndicators> {
        let prices = prices_of(history);
        let volumes = volumes_of(history);

        match TechnicalIndicators::calculate(&prices, &volumes, &self.config.periods) {
            Ok(indicators) => Some(indicators),
            Err(e) => {
                warn!(samples = history.len(), error = %e, "technical analysis unavailable");
                None
            }
        }
    }

    pub fn analyze_sentiment(&self, history: &[PriceSample]) -> MarketSentiment {
        let prices = prices_of(history);
        let volumes = volumes_of(history);
        let patterns = find_patterns(&prices, &self.config.patterns);
        MarketSentiment::analyze(&prices, &volumes, patterns, &self.config)
    }

    pub fn analyze_multi_timeframe(&self, history: &[PriceSample]) -> Option<MultiTimeFrameAnalysis> {
        if history.is_empty() {
            debug!("multi time frame analysis skipped: empty history");
            return None;
        }
        Some(MultiTimeFrameAnalysis::from_history(history, &self.config.periods))
    }

    /// Suggestion for the latest sample: buy at its low, sell at its high.
    pub fn suggest(
        &self,
        item_id: u32,
        item_name: &str,
        history: &[PriceSample],
    ) -> Option<TradingSuggestion> {
        let latest = history.last()?;
        let indicators = self.analyze(history)?;

        let suggestion = TradingSuggestion::from_analysis(
            item_id,
            item_name,
            latest.low,
            latest.high,
            indicators.overall_confidence(),
            indicators.trend_type(),
            &self.config.suggestion,
        );

        debug!(
            item_id,
            item = item_name,
            action = %suggestion.action,
            confidence = format!("{:.3}", suggestion.confidence),
            profit = format!("{:.2}", suggestion.potential_profit),
            "trading suggestion"
        );

        Some(suggestion)
    }
}
