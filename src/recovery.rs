//! Recovery scoring from baseline deviation and sleep quality
//!
//! Recovery expresses readiness on a 0-100 scale by comparing today's HRV
//! and resting heart rate against the personal rolling baseline and folding
//! in last night's sleep quality. Higher-than-baseline HRV is favorable;
//! lower-than-baseline RHR is favorable, so the RHR deviation is
//! sign-inverted to keep positive meaning good on both axes.

use crate::models::{RecoveryCategory, RecoveryScore, UserBaseline};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recovery calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecoveryError {
    #[error("Invalid {field} baseline: {value} (must be positive and finite)")]
    InvalidBaseline { field: &'static str, value: f64 },

    #[error("Invalid {field} reading: {value} (must be positive and finite)")]
    InvalidReading { field: &'static str, value: f64 },
}

/// Recovery calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Weight of the HRV deviation sub-score (default: 0.50)
    pub hrv_weight: f64,

    /// Weight of the RHR deviation sub-score (default: 0.30)
    pub rhr_weight: f64,

    /// Weight of the sleep quality sub-score (default: 0.20)
    pub sleep_weight: f64,

    /// Deviation magnitude that saturates a sub-score (default: 0.30)
    ///
    /// A deviation of +clamp maps to 100, -clamp to 0, and a reading right
    /// on baseline to a neutral 50.
    pub deviation_clamp: f64,

    /// Sleep quality assumed when no sleep was recorded (default: 50)
    pub neutral_sleep_quality: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        RecoveryConfig {
            hrv_weight: 0.50,
            rhr_weight: 0.30,
            sleep_weight: 0.20,
            deviation_clamp: 0.30,
            neutral_sleep_quality: 50.0,
        }
    }
}

/// One day's input to the recovery calculator
///
/// The baseline must already be established; callers with insufficient
/// history have no `UserBaseline` to pass and skip recovery for the day
/// instead of fabricating one.
#[derive(Debug, Clone)]
pub struct RecoveryInput {
    /// Date the score applies to
    pub date: NaiveDate,

    /// Today's HRV (SDNN) reading in milliseconds
    pub current_hrv_ms: f64,

    /// Today's resting heart rate in beats per minute
    pub current_rhr_bpm: f64,

    /// Established personal baseline
    pub baseline: UserBaseline,

    /// Last night's sleep quality on the 0-100 scale, if recorded
    pub sleep_quality: Option<f64>,
}

/// Core recovery score calculation engine
#[derive(Debug, Clone, Default)]
pub struct RecoveryCalculator {
    config: RecoveryConfig,
}

impl RecoveryCalculator {
    /// Create a calculator with the default configuration
    pub fn new() -> Self {
        RecoveryCalculator {
            config: RecoveryConfig::default(),
        }
    }

    /// Create a calculator with a custom configuration
    pub fn with_config(config: RecoveryConfig) -> Self {
        RecoveryCalculator { config }
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Calculate the day's recovery score
    pub fn calculate(&self, input: &RecoveryInput) -> Result<RecoveryScore, RecoveryError> {
        let baseline = &input.baseline;
        Self::validate_positive(baseline.hrv_baseline_ms, "HRV", true)?;
        Self::validate_positive(baseline.rhr_baseline_bpm, "RHR", true)?;
        Self::validate_positive(input.current_hrv_ms, "HRV", false)?;
        Self::validate_positive(input.current_rhr_bpm, "RHR", false)?;

        // Positive deviation = favorable on both axes
        let hrv_deviation =
            (input.current_hrv_ms - baseline.hrv_baseline_ms) / baseline.hrv_baseline_ms;
        let rhr_deviation =
            (baseline.rhr_baseline_bpm - input.current_rhr_bpm) / baseline.rhr_baseline_bpm;

        let hrv_subscore = self.deviation_subscore(hrv_deviation);
        let rhr_subscore = self.deviation_subscore(rhr_deviation);
        let sleep_quality = input
            .sleep_quality
            .unwrap_or(self.config.neutral_sleep_quality)
            .clamp(0.0, 100.0);

        let weighted = self.config.hrv_weight * hrv_subscore
            + self.config.rhr_weight * rhr_subscore
            + self.config.sleep_weight * sleep_quality;
        let score = weighted.round().clamp(0.0, 100.0) as u8;

        tracing::debug!(
            date = %input.date,
            score,
            hrv_deviation,
            rhr_deviation,
            sleep_quality,
            "recovery calculated"
        );

        Ok(RecoveryScore {
            date: input.date,
            score,
            category: RecoveryCategory::from_score(score),
            hrv_deviation,
            rhr_deviation,
            sleep_quality,
            hrv_baseline: baseline.hrv_baseline_ms,
            rhr_baseline: baseline.rhr_baseline_bpm,
            current_hrv: input.current_hrv_ms,
            current_rhr: input.current_rhr_bpm,
        })
    }

    /// Map a signed deviation onto a 0-100 sub-score
    ///
    /// Clamped to the configured magnitude and rescaled linearly: a reading
    /// right on baseline comes out at a neutral 50.
    fn deviation_subscore(&self, deviation: f64) -> f64 {
        let clamp = self.config.deviation_clamp;
        let clamped = deviation.clamp(-clamp, clamp);
        50.0 + (clamped / clamp) * 50.0
    }

    fn validate_positive(
        value: f64,
        field: &'static str,
        is_baseline: bool,
    ) -> Result<(), RecoveryError> {
        if value.is_finite() && value > 0.0 {
            return Ok(());
        }
        if is_baseline {
            Err(RecoveryError::InvalidBaseline { field, value })
        } else {
            Err(RecoveryError::InvalidReading { field, value })
        }
    }
}

impl RecoveryScore {
    /// Derived one-line explanation; never stored
    pub fn summary(&self) -> String {
        let hrv_pct = self.hrv_deviation * 100.0;
        let rhr_pct = self.rhr_deviation * 100.0;
        format!(
            "HRV {:.0}ms is {:+.0}% vs baseline, RHR {:.0}bpm is {:+.0}% vs baseline, sleep quality {:.0}/100.",
            self.current_hrv, hrv_pct, self.current_rhr, rhr_pct, self.sleep_quality
        )
    }
}
