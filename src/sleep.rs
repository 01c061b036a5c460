//! Sleep scoring from one night's stage breakdown
//!
//! A session scores 0-100 from three weighted components: duration against
//! the personalized sleep need (40%), efficiency in bed (35%), and stage
//! quality of deep and REM sleep against ideal proportions (25%).

use crate::models::{SleepScore, SleepSession};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sleep calculation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SleepError {
    #[error("Invalid sleep need: {0} minutes (must be positive and finite)")]
    InvalidSleepNeed(f64),
}

/// Sleep calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Weight of the duration component (default: 0.40)
    pub duration_weight: f64,

    /// Weight of the efficiency component (default: 0.35)
    pub efficiency_weight: f64,

    /// Weight of the stage-quality component (default: 0.25)
    pub stage_weight: f64,

    /// Ideal deep-sleep share of total sleep (default: 0.20)
    pub ideal_deep_fraction: f64,

    /// Ideal REM-sleep share of total sleep (default: 0.25)
    pub ideal_rem_fraction: f64,

    /// Multiple of the ideal share beyond which excess is penalized
    pub excess_tolerance: f64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        SleepConfig {
            duration_weight: 0.40,
            efficiency_weight: 0.35,
            stage_weight: 0.25,
            ideal_deep_fraction: 0.20,
            ideal_rem_fraction: 0.25,
            excess_tolerance: 1.5,
        }
    }
}

/// Core sleep score calculation engine
#[derive(Debug, Clone, Default)]
pub struct SleepCalculator {
    config: SleepConfig,
}

impl SleepCalculator {
    /// Create a calculator with the default configuration
    pub fn new() -> Self {
        SleepCalculator {
            config: SleepConfig::default(),
        }
    }

    /// Create a calculator with a custom configuration
    pub fn with_config(config: SleepConfig) -> Self {
        SleepCalculator { config }
    }

    pub fn config(&self) -> &SleepConfig {
        &self.config
    }

    /// Score one recorded sleep session against the personalized need
    pub fn calculate(
        &self,
        session: &SleepSession,
        sleep_need_minutes: f64,
        date: NaiveDate,
    ) -> Result<SleepScore, SleepError> {
        if !(sleep_need_minutes.is_finite() && sleep_need_minutes > 0.0) {
            return Err(SleepError::InvalidSleepNeed(sleep_need_minutes));
        }

        let total = session.total_duration_minutes();
        let efficiency = session.efficiency();

        let duration_score = (total / sleep_need_minutes).clamp(0.0, 1.0) * 100.0;
        let efficiency_score = efficiency * 100.0;
        let stage_score = self.stage_score(session.deep_minutes, session.rem_minutes, total);

        let weighted = self.config.duration_weight * duration_score
            + self.config.efficiency_weight * efficiency_score
            + self.config.stage_weight * stage_score;
        let score = weighted.round().clamp(0.0, 100.0) as u8;

        tracing::debug!(
            date = %date,
            score,
            duration_score,
            efficiency_score,
            stage_score,
            "sleep calculated"
        );

        Ok(SleepScore {
            date,
            score,
            duration_score,
            efficiency_score,
            stage_score,
            total_duration_minutes: total,
            sleep_need_minutes,
            efficiency,
            deep_sleep_minutes: session.deep_minutes,
            rem_sleep_minutes: session.rem_minutes,
        })
    }

    /// Stage-quality component: deep and REM each contribute half
    fn stage_score(&self, deep_minutes: f64, rem_minutes: f64, total_minutes: f64) -> f64 {
        if total_minutes <= 0.0 {
            return 0.0;
        }
        let deep = self.stage_subscore(deep_minutes, self.config.ideal_deep_fraction * total_minutes);
        let rem = self.stage_subscore(rem_minutes, self.config.ideal_rem_fraction * total_minutes);
        (deep + rem) / 2.0
    }

    /// Quality of one stage against its ideal minutes
    ///
    /// Full credit from the ideal up to `excess_tolerance` times it; linear
    /// shortfall credit below; linear penalty beyond the tolerance, floored
    /// at half credit (long deep or REM phases are unusual, not harmful the
    /// way a shortfall is).
    fn stage_subscore(&self, minutes: f64, ideal_minutes: f64) -> f64 {
        if ideal_minutes <= 0.0 {
            return 0.0;
        }
        let tolerance = self.config.excess_tolerance * ideal_minutes;
        if minutes < ideal_minutes {
            (minutes / ideal_minutes) * 100.0
        } else if minutes <= tolerance {
            100.0
        } else {
            (100.0 - ((minutes - tolerance) / ideal_minutes) * 100.0).clamp(50.0, 100.0)
        }
    }
}

impl SleepScore {
    /// Derived one-line explanation; never stored
    pub fn summary(&self) -> String {
        let actual_h = self.total_duration_minutes / 60.0;
        let need_h = self.sleep_need_minutes / 60.0;
        let efficiency_pct = self.efficiency * 100.0;
        let efficiency_tier = if efficiency_pct > 85.0 {
            "excellent"
        } else if efficiency_pct >= 75.0 {
            "good"
        } else if efficiency_pct >= 65.0 {
            "fair"
        } else {
            "poor"
        };

        format!(
            "You slept {:.1}h of your {:.1}h need with {} efficiency ({:.0}%).",
            actual_h, need_h, efficiency_tier, efficiency_pct
        )
    }
}
