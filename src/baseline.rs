//! Rolling personal baselines for HRV and resting heart rate
//!
//! Baselines turn absolute readings into deviations from the individual's
//! own norm. A baseline is only reported once enough history exists; before
//! that callers get `None` rather than a misleading numeric zero.

use crate::models::UserBaseline;
use crate::stats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Baseline engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Rolling window length in days (default: 7)
    pub window_days: u16,

    /// Minimum historical daily values before a baseline is established
    ///
    /// Never enforced below `window_days`.
    pub min_history_days: u16,

    /// Tukey-fence multiplier for outlier rejection (default: 1.5)
    pub outlier_threshold: f64,

    /// Moving-average window for smoothing daily values (default: 3)
    pub smoothing_window: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        BaselineConfig {
            window_days: 7,
            min_history_days: 7,
            outlier_threshold: stats::DEFAULT_OUTLIER_THRESHOLD,
            smoothing_window: 3,
        }
    }
}

/// Computes rolling baselines from historical daily values
///
/// Stateless: history lives with the persistence collaborator and is passed
/// in per call, oldest first.
#[derive(Debug, Clone, Default)]
pub struct BaselineEngine {
    config: BaselineConfig,
}

impl BaselineEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        BaselineEngine {
            config: BaselineConfig::default(),
        }
    }

    /// Create an engine with a custom configuration
    pub fn with_config(config: BaselineConfig) -> Self {
        BaselineEngine { config }
    }

    pub fn config(&self) -> &BaselineConfig {
        &self.config
    }

    /// Mean of the trailing `days` values
    pub fn rolling_average(&self, values: &[f64], days: usize) -> f64 {
        if values.is_empty() || days == 0 {
            return 0.0;
        }
        let start = values.len().saturating_sub(days);
        stats::mean(&values[start..])
    }

    /// Values falling outside the Tukey fence for the given threshold
    pub fn detect_outliers(&self, values: &[f64], threshold: f64) -> Vec<f64> {
        if values.len() < 4 {
            return Vec::new();
        }
        let (q1, _, q3) = stats::quartiles(values);
        let iqr = q3 - q1;
        let lower = q1 - threshold * iqr;
        let upper = q3 + threshold * iqr;
        values
            .iter()
            .copied()
            .filter(|&v| v < lower || v > upper)
            .collect()
    }

    /// Centered moving average over `window_size` values
    pub fn smooth_values(&self, values: &[f64], window_size: usize) -> Vec<f64> {
        stats::moving_average(values, window_size)
    }

    /// Compute the rolling baseline for one daily-value series
    ///
    /// Pipeline order matters: outliers are removed before smoothing so a
    /// single bad day cannot bias the moving average, then the trailing
    /// window mean is taken. Returns `None` until the raw history holds at
    /// least the configured minimum number of daily values.
    pub fn rolling_baseline(&self, daily_values: &[f64]) -> Option<f64> {
        let required = self.config.window_days.max(self.config.min_history_days) as usize;
        if daily_values.len() < required {
            return None;
        }

        let cleaned = stats::remove_outliers(daily_values, self.config.outlier_threshold);
        let smoothed = self.smooth_values(&cleaned, self.config.smoothing_window);
        let baseline = self.rolling_average(&smoothed, self.config.window_days as usize);
        Some(baseline.max(0.0))
    }

    /// Compute the user's HRV/RHR baseline snapshot for `date`
    ///
    /// Both series must be established; a baseline with a fabricated zero
    /// on either side would poison every downstream recovery score.
    pub fn calculate_baseline(
        &self,
        hrv_history: &[f64],
        rhr_history: &[f64],
        date: NaiveDate,
    ) -> Option<UserBaseline> {
        let hrv_baseline_ms = self.rolling_baseline(hrv_history)?;
        let rhr_baseline_bpm = self.rolling_baseline(rhr_history)?;

        tracing::debug!(
            hrv_baseline_ms,
            rhr_baseline_bpm,
            window_days = self.config.window_days,
            "baseline established"
        );

        Some(UserBaseline {
            hrv_baseline_ms,
            rhr_baseline_bpm,
            computed_on: date,
            window_days: self.config.window_days,
        })
    }
}
