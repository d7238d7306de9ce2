// =============================================================================
// Volume Metrics
// =============================================================================
//
// Mean and population σ over the whole volume series.  The latest sample is
// "high volume" when it exceeds mean + σ; strength is the sigmoid of its
// z-score (0.5 when every sample is identical).

use serde::{Deserialize, Serialize};

use super::series::{mean, sigmoid, standard_deviation};
use super::Indicator;
use crate::error::{IndicatorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetrics {
    pub volume_ma: f64,
    pub volume_std_dev: f64,
    pub is_high_volume: bool,
    pub volume_history: Vec<f64>,
}

impl VolumeMetrics {
    /// # Errors
    /// `InsufficientData` for an empty series.
    pub fn calculate(volumes: &[u64]) -> Result<Self> {
        IndicatorError::require("volume", 1, volumes.len())?;

        let volume_history: Vec<f64> = volumes.iter().map(|&v| v as f64).collect();
        let volume_ma = mean(&volume_history);
        let volume_std_dev = standard_deviation(&volume_history);
        let current = volume_history[volume_history.len() - 1];

        Ok(Self {
            volume_ma,
            volume_std_dev,
            is_high_volume: current > volume_ma + volume_std_dev,
            volume_history,
        })
    }

    pub fn current_volume(&self) -> f64 {
        self.volume_history.last().copied().unwrap_or(0.0)
    }
}

impl Indicator for VolumeMetrics {
    fn value(&self) -> f64 {
        self.current_volume()
    }

    fn history(&self) -> &[f64] {
        &self.volume_history
    }

    fn strength(&self) -> f64 {
        if self.volume_history.is_empty() {
            return 0.0;
        }
        if self.volume_std_dev == 0.0 {
            return 0.5;
        }
        sigmoid((self.current_volume() - self.volume_ma) / self.volume_std_dev)
    }
}
