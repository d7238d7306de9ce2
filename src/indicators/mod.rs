// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free calculators.  Each one consumes a chronological price
// (or volume) series and returns an immutable result that keeps its full
// history, or an `IndicatorError` when its minimum sample count is not met.

pub mod macd;
pub mod roc;
pub mod rsi;
pub mod series;
pub mod trend;
pub mod volume;

pub use macd::Macd;
pub use roc::Roc;
pub use rsi::Rsi;
pub use trend::{TrendMetrics, TrendType};
pub use volume::VolumeMetrics;

/// Common read-only view over every indicator result.
pub trait Indicator {
    /// Latest scalar value of the indicator.
    fn value(&self) -> f64;

    /// Full computed history, one slot per input sample.
    fn history(&self) -> &[f64];

    /// Derived signal strength in `[0, 1]`.
    fn strength(&self) -> f64;
}
