//! Daily strain scoring from heart-rate zone time integration
//!
//! Strain quantifies cardiovascular load on a 0-21 scale: every heart-rate
//! sample is bucketed into an intensity zone by its fraction of max HR,
//! minutes-in-zone are weighted exponentially and summed to a raw load, and
//! the load is compressed logarithmically so the score saturates smoothly
//! instead of growing without bound.

use crate::models::{
    HeartRateSample, StrainCategory, StrainScore, WorkoutContribution, WorkoutSession, ZoneMinutes,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strain calculation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrainError {
    #[error("Invalid max heart rate: {0} bpm (valid range: 100-250)")]
    InvalidMaxHeartRate(u16),
}

/// Strain calculator configuration
///
/// The compression constants are calibration parameters, not incidental
/// values: with `load_scale` 15 and `saturation_load` 600 a raw load of 0
/// maps to score 0, a typical training day (load around 200) lands at about
/// 15, and the curve reaches 21 at load 600.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainConfig {
    /// Multipliers for minutes in zones 1-5
    pub zone_weights: [f64; 5],

    /// Divisor inside the logarithm; smaller values steepen the low end
    pub load_scale: f64,

    /// Raw load at which the score reaches exactly 21
    pub saturation_load: f64,

    /// Longest consecutive-sample gap that still integrates, in seconds
    ///
    /// Gaps beyond this are sensor-off time and contribute nothing.
    pub max_sample_gap_seconds: f64,

    /// Duration credited to the final sample of a stream, in seconds
    pub nominal_interval_seconds: f64,
}

impl Default for StrainConfig {
    fn default() -> Self {
        StrainConfig {
            zone_weights: [0.5, 1.0, 2.0, 4.0, 8.0],
            load_scale: 15.0,
            saturation_load: 600.0,
            max_sample_gap_seconds: 300.0,
            nominal_interval_seconds: 60.0,
        }
    }
}

/// One day's input to the strain calculator
///
/// `samples` is the all-day stream and must exclude samples covered by a
/// workout in `workouts`: workout samples are counted once, from the workout
/// record, and folded into the same zone totals.
#[derive(Debug, Clone)]
pub struct StrainInput<'a> {
    /// Date the score applies to
    pub date: NaiveDate,

    /// All-day heart-rate stream, non-decreasing by timestamp
    pub samples: &'a [HeartRateSample],

    /// Workouts completed during the day
    pub workouts: &'a [WorkoutSession],

    /// User's maximum heart rate in bpm
    pub max_heart_rate: u16,
}

/// Core strain calculation engine
#[derive(Debug, Clone, Default)]
pub struct StrainCalculator {
    config: StrainConfig,
}

impl StrainCalculator {
    /// Create a calculator with the default configuration
    pub fn new() -> Self {
        StrainCalculator {
            config: StrainConfig::default(),
        }
    }

    /// Create a calculator with a custom configuration
    pub fn with_config(config: StrainConfig) -> Self {
        StrainCalculator { config }
    }

    pub fn config(&self) -> &StrainConfig {
        &self.config
    }

    /// Calculate the day's strain score
    pub fn calculate(&self, input: &StrainInput<'_>) -> Result<StrainScore, StrainError> {
        if !(100..=250).contains(&input.max_heart_rate) {
            return Err(StrainError::InvalidMaxHeartRate(input.max_heart_rate));
        }

        let mut zone_minutes = self.integrate_zone_minutes(input.samples, input.max_heart_rate);

        let mut workout_contributions = Vec::with_capacity(input.workouts.len());
        for workout in input.workouts {
            let workout_zones = self.integrate_zone_minutes(&workout.samples, input.max_heart_rate);
            let load = self.raw_load(&workout_zones);
            zone_minutes.fold(&workout_zones);
            workout_contributions.push(WorkoutContribution {
                workout_id: workout.id,
                activity: workout.activity,
                zone_minutes: workout_zones,
                load,
            });
        }

        let load = self.raw_load(&zone_minutes);
        let score = self.compress_load(load);

        tracing::debug!(
            date = %input.date,
            raw_load = load,
            score,
            activity_minutes = zone_minutes.total(),
            "strain calculated"
        );

        Ok(StrainScore {
            date: input.date,
            score,
            category: StrainCategory::from_score(score),
            activity_minutes: zone_minutes.total(),
            zone_minutes,
            workout_contributions,
        })
    }

    /// Accumulate minutes-in-zone from a sample stream
    ///
    /// Each sample's zone holds until the next sample, with the delta capped
    /// at `max_sample_gap_seconds`; the final sample is credited one nominal
    /// interval. Samples below 50% of max HR contribute nothing.
    fn integrate_zone_minutes(&self, samples: &[HeartRateSample], max_hr: u16) -> ZoneMinutes {
        let mut minutes = ZoneMinutes::default();

        for (i, sample) in samples.iter().enumerate() {
            let duration_seconds = match samples.get(i + 1) {
                Some(next) => {
                    let delta = (next.timestamp - sample.timestamp).num_seconds() as f64;
                    delta.clamp(0.0, self.config.max_sample_gap_seconds)
                }
                None => self.config.nominal_interval_seconds,
            };

            let fraction = f64::from(sample.beats_per_minute) / f64::from(max_hr);
            let slot = match Self::zone_index(fraction) {
                Some(slot) => slot,
                None => continue,
            };

            let duration_minutes = duration_seconds / 60.0;
            match slot {
                0 => minutes.zone1 += duration_minutes,
                1 => minutes.zone2 += duration_minutes,
                2 => minutes.zone3 += duration_minutes,
                3 => minutes.zone4 += duration_minutes,
                _ => minutes.zone5 += duration_minutes,
            }
        }

        minutes
    }

    /// Zone slot for a fraction of max HR; `None` below the 50% floor
    fn zone_index(fraction: f64) -> Option<usize> {
        if fraction < 0.5 {
            None
        } else if fraction < 0.6 {
            Some(0)
        } else if fraction < 0.7 {
            Some(1)
        } else if fraction < 0.8 {
            Some(2)
        } else if fraction < 0.9 {
            Some(3)
        } else {
            Some(4)
        }
    }

    /// Zone-weighted raw load
    pub fn raw_load(&self, minutes: &ZoneMinutes) -> f64 {
        let w = &self.config.zone_weights;
        minutes.zone1 * w[0]
            + minutes.zone2 * w[1]
            + minutes.zone3 * w[2]
            + minutes.zone4 * w[3]
            + minutes.zone5 * w[4]
    }

    /// Compress a raw load onto the 0-21 scale
    ///
    /// `21 * ln(1 + load/scale) / ln(1 + saturation/scale)`, clamped: load 0
    /// maps to 0 and loads past `saturation_load` clamp at 21.
    pub fn compress_load(&self, load: f64) -> f64 {
        if load <= 0.0 {
            return 0.0;
        }
        let scale = self.config.load_scale;
        let ceiling = (1.0 + self.config.saturation_load / scale).ln();
        let score = 21.0 * (1.0 + load / scale).ln() / ceiling;
        score.clamp(0.0, 21.0)
    }
}
