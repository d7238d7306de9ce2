// =============================================================================
// Tavern Signals — technical analysis engine for traded item prices
// =============================================================================
//
// Indicator calculators, a composite scorer, a multi-timeframe aggregator, a
// chart pattern recognizer and a sentiment classifier over chronological
// price histories.  `AnalysisService` wires them together for one item.

pub mod analysis_config;
pub mod analysis_service;
pub mod error;
pub mod indicators;
pub mod multi_timeframe;
pub mod patterns;
pub mod sentiment;
pub mod signals;
pub mod timeframe;
pub mod types;

pub use analysis_config::AnalysisConfig;
pub use analysis_service::AnalysisService;
pub use error::{IndicatorError, Result};
pub use multi_timeframe::{MultiTimeFrameAnalysis, TrendAlignment};
pub use patterns::{PatternType, PricePattern};
pub use sentiment::{MarketSentiment, SentimentLevel};
pub use signals::{Action, IndicatorSummary, TechnicalIndicators, TradingSuggestion};
pub use timeframe::TimeFrame;
pub use types::PriceSample;
