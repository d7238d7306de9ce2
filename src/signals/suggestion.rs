// =============================================================================
// Trading Suggestion — confidence + trend mapped to BUY / SELL / HOLD
// =============================================================================
//
// Decision rule:
//   confidence < min_confidence           => HOLD
//   (strong) uptrend                      => BUY
//   (strong) downtrend                    => SELL
//   sideways and confidence > sideways_buy => BUY, else HOLD

use serde::{Deserialize, Serialize};

use crate::analysis_config::SuggestionConfig;
use crate::indicators::TrendType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// A formatted recommendation for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSuggestion {
    pub item_id: u32,
    pub item_name: String,
    pub action: Action,
    pub confidence: f64,
    /// Percentage gain from buying at `buy_price` and selling at `sell_price`.
    pub potential_profit: f64,
    pub risk: f64,
    pub trend: TrendType,
    pub reasoning: String,
}

impl TradingSuggestion {
    pub fn from_analysis(
        item_id: u32,
        item_name: impl Into<String>,
        buy_price: f64,
        sell_price: f64,
        confidence: f64,
        trend: TrendType,
        config: &SuggestionConfig,
    ) -> Self {
        let action = determine_action(confidence, trend, config);
        let potential_profit = if buy_price == 0.0 {
            0.0
        } else {
            (sell_price - buy_price) / buy_price * 100.0
        };

        Self {
            item_id,
            item_name: item_name.into(),
            action,
            confidence,
            potential_profit,
            risk: 1.0 - confidence,
            trend,
            reasoning: build_reasoning(action, confidence, trend, potential_profit),
        }
    }

    /// Whether `current` differs enough from `previous` to be worth publishing.
    pub fn has_significant_change(
        previous: Option<&TradingSuggestion>,
        current: &TradingSuggestion,
        config: &SuggestionConfig,
    ) -> bool {
        let Some(old) = previous else {
            return true;
        };
        old.action != current.action
            || (old.confidence - current.confidence).abs() > config.confidence_change
            || (old.potential_profit - current.potential_profit).abs() > config.profit_change
    }
}

fn determine_action(confidence: f64, trend: TrendType, config: &SuggestionConfig) -> Action {
    if confidence < config.min_confidence {
        return Action::Hold;
    }
    if trend.is_bullish() {
        Action::Buy
    } else if trend.is_bearish() {
        Action::Sell
    } else if confidence > config.sideways_buy_confidence {
        Action::Buy
    } else {
        Action::Hold
    }
}

fn build_reasoning(action: Action, confidence: f64, trend: TrendType, potential_profit: f64) -> String {
    let mut reasoning = format!(
        "{} recommendation with {:.1}% confidence. Market is showing a {}. ",
        action,
        confidence * 100.0,
        trend.to_string().to_lowercase()
    );
    if potential_profit > 0.0 {
        reasoning.push_str(&format!("Potential profit: {:.1}%", potential_profit));
    }
    reasoning
}
