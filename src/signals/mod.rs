// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator results into scores and recommendations:
// - Composite scorer (fixed-weight indicator blend)
// - Trading suggestion formatter (BUY / SELL / HOLD plus rationale)

pub mod composite;
pub mod suggestion;

pub use composite::{IndicatorSummary, TechnicalIndicators};
pub use suggestion::{Action, TradingSuggestion};
