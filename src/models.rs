use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Origin of a physiological sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleSource {
    /// Wrist-worn watch sensor
    Watch,
    /// Phone-based sensor or manual entry
    Phone,
    /// Imported from an external platform
    Imported,
}

impl fmt::Display for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSource::Watch => write!(f, "watch"),
            SampleSource::Phone => write!(f, "phone"),
            SampleSource::Imported => write!(f, "imported"),
        }
    }
}

/// Single heart-rate reading
///
/// Produced by the sensor collaborator in non-decreasing timestamp order;
/// consumed read-only by the strain calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute
    pub beats_per_minute: u16,

    /// Sensor that produced the reading
    pub source: SampleSource,
}

/// Single heart-rate-variability reading
///
/// SDNN is the root metric; the raw RR-interval sequence is carried when
/// the sensor provides it but is not required for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvSample {
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Standard deviation of NN intervals in milliseconds
    ///
    /// Typical range 20-150ms; higher generally indicates better recovery.
    pub sdnn_ms: f64,

    /// Raw beat-to-beat intervals in milliseconds, if available
    pub rr_intervals_ms: Option<Vec<f64>>,
}

/// One night of recorded sleep with per-stage minute breakdown
///
/// Immutable once recorded. Total duration and efficiency are derived from
/// the stage breakdown rather than stored, so they cannot drift out of sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSession {
    /// Time the user went to bed
    pub start: DateTime<Utc>,

    /// Time the user got up
    pub end: DateTime<Utc>,

    /// Deep (slow-wave) sleep in minutes
    pub deep_minutes: f64,

    /// REM sleep in minutes
    pub rem_minutes: f64,

    /// Light sleep in minutes
    pub light_minutes: f64,

    /// Awake time during the session in minutes
    pub awake_minutes: f64,
}

impl SleepSession {
    /// Total asleep time in minutes (excludes awake time)
    pub fn total_duration_minutes(&self) -> f64 {
        self.deep_minutes + self.rem_minutes + self.light_minutes
    }

    /// Total time in bed in minutes
    pub fn time_in_bed_minutes(&self) -> f64 {
        let wall_clock = (self.end - self.start).num_seconds() as f64 / 60.0;
        // Stage minutes are the fallback when wall-clock data is degenerate
        if wall_clock > 0.0 {
            wall_clock
        } else {
            self.total_duration_minutes() + self.awake_minutes
        }
    }

    /// Sleep efficiency: asleep time / time in bed, in [0, 1]
    pub fn efficiency(&self) -> f64 {
        let in_bed = self.time_in_bed_minutes();
        if in_bed <= 0.0 {
            return 0.0;
        }
        (self.total_duration_minutes() / in_bed).clamp(0.0, 1.0)
    }
}

/// Activity types for workout sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Running,
    Cycling,
    Swimming,
    Strength,
    Hiit,
    Walking,
    Other,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityType::Running => write!(f, "Running"),
            ActivityType::Cycling => write!(f, "Cycling"),
            ActivityType::Swimming => write!(f, "Swimming"),
            ActivityType::Strength => write!(f, "Strength"),
            ActivityType::Hiit => write!(f, "HIIT"),
            ActivityType::Walking => write!(f, "Walking"),
            ActivityType::Other => write!(f, "Other"),
        }
    }
}

/// A completed workout with its own heart-rate sample stream
///
/// Workout samples are counted once, from this record; the all-day stream
/// handed to the strain calculator must exclude them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique identifier for the workout
    pub id: Uuid,

    /// Activity type
    pub activity: ActivityType,

    /// Workout start time
    pub start: DateTime<Utc>,

    /// Workout end time
    pub end: DateTime<Utc>,

    /// Heart-rate samples recorded during the workout
    pub samples: Vec<HeartRateSample>,
}

impl WorkoutSession {
    /// Workout duration in minutes
    pub fn duration_minutes(&self) -> f64 {
        ((self.end - self.start).num_seconds() as f64 / 60.0).max(0.0)
    }
}

/// Rolling personal baseline for HRV and resting heart rate
///
/// A value snapshot: mutated only by re-running the baseline engine over an
/// updated historical window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBaseline {
    /// Rolling HRV (SDNN) baseline in milliseconds
    pub hrv_baseline_ms: f64,

    /// Rolling resting heart rate baseline in beats per minute
    pub rhr_baseline_bpm: f64,

    /// Date the baseline was computed for
    pub computed_on: NaiveDate,

    /// Length of the rolling window in days
    pub window_days: u16,
}

/// Recovery categories derived from the 0-100 recovery score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryCategory {
    /// Score below 34: inadequate recovery
    Poor,
    /// Score 34-66: partial recovery
    Moderate,
    /// Score 67 and above: well recovered
    Optimal,
}

impl RecoveryCategory {
    /// Categorize a recovery score; the only way a category is ever assigned
    pub fn from_score(score: u8) -> Self {
        if score >= 67 {
            RecoveryCategory::Optimal
        } else if score >= 34 {
            RecoveryCategory::Moderate
        } else {
            RecoveryCategory::Poor
        }
    }
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Poor => write!(f, "Poor"),
            RecoveryCategory::Moderate => write!(f, "Moderate"),
            RecoveryCategory::Optimal => write!(f, "Optimal"),
        }
    }
}

/// Daily recovery score with the inputs that explain it
///
/// Produced once per day; immutable after creation. The explanation is
/// derivable from these fields and never stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    /// Date the score applies to
    pub date: NaiveDate,

    /// Overall recovery score in [0, 100]
    pub score: u8,

    /// Category derived from the score
    pub category: RecoveryCategory,

    /// Signed HRV deviation from baseline (positive = favorable)
    pub hrv_deviation: f64,

    /// Signed RHR deviation from baseline (positive = favorable)
    pub rhr_deviation: f64,

    /// Sleep quality input used, on the 0-100 scale
    pub sleep_quality: f64,

    /// HRV baseline the deviation was measured against (ms)
    pub hrv_baseline: f64,

    /// RHR baseline the deviation was measured against (bpm)
    pub rhr_baseline: f64,

    /// Current HRV reading (ms)
    pub current_hrv: f64,

    /// Current resting heart rate reading (bpm)
    pub current_rhr: f64,
}

/// Strain categories derived from the 0-21 strain score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrainCategory {
    /// Score below 10
    Light,
    /// Score 10 up to 14
    Moderate,
    /// Score 14 up to 18
    High,
    /// Score 18 and above
    AllOut,
}

impl StrainCategory {
    /// Categorize a strain score; the only way a category is ever assigned
    pub fn from_score(score: f64) -> Self {
        if score >= 18.0 {
            StrainCategory::AllOut
        } else if score >= 14.0 {
            StrainCategory::High
        } else if score >= 10.0 {
            StrainCategory::Moderate
        } else {
            StrainCategory::Light
        }
    }
}

impl fmt::Display for StrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrainCategory::Light => write!(f, "Light"),
            StrainCategory::Moderate => write!(f, "Moderate"),
            StrainCategory::High => write!(f, "High"),
            StrainCategory::AllOut => write!(f, "All Out"),
        }
    }
}

/// Minutes accumulated in each heart-rate intensity zone
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneMinutes {
    /// Zone 1: 50-60% of max HR
    pub zone1: f64,
    /// Zone 2: 60-70% of max HR
    pub zone2: f64,
    /// Zone 3: 70-80% of max HR
    pub zone3: f64,
    /// Zone 4: 80-90% of max HR
    pub zone4: f64,
    /// Zone 5: 90%+ of max HR
    pub zone5: f64,
}

impl ZoneMinutes {
    /// Total minutes across all five zones
    pub fn total(&self) -> f64 {
        self.zone1 + self.zone2 + self.zone3 + self.zone4 + self.zone5
    }

    /// Add another zone breakdown into this one
    pub fn fold(&mut self, other: &ZoneMinutes) {
        self.zone1 += other.zone1;
        self.zone2 += other.zone2;
        self.zone3 += other.zone3;
        self.zone4 += other.zone4;
        self.zone5 += other.zone5;
    }
}

/// Itemized strain contribution of a single workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutContribution {
    /// Workout this contribution came from
    pub workout_id: Uuid,

    /// Activity type of the workout
    pub activity: ActivityType,

    /// Zone-minute breakdown of the workout's own samples
    pub zone_minutes: ZoneMinutes,

    /// Zone-weighted raw load contributed by the workout
    pub load: f64,
}

/// Daily strain score with per-zone and per-workout breakdown
///
/// Recomputation as more samples arrive intraday replaces the previous
/// score, never merges with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainScore {
    /// Date the score applies to
    pub date: NaiveDate,

    /// Overall strain score in [0, 21]
    pub score: f64,

    /// Category derived from the score
    pub category: StrainCategory,

    /// Total minutes spent at or above 50% of max HR
    pub activity_minutes: f64,

    /// Minutes accumulated per zone (day stream plus workouts)
    pub zone_minutes: ZoneMinutes,

    /// Itemized per-workout contributions
    pub workout_contributions: Vec<WorkoutContribution>,
}

/// Sleep categories derived from the 0-100 sleep score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepCategory {
    /// Score below 50
    Poor,
    /// Score 50-69
    Fair,
    /// Score 70-84
    Good,
    /// Score 85 and above
    Excellent,
}

impl SleepCategory {
    /// Categorize a sleep score; the only way a category is ever assigned
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            SleepCategory::Excellent
        } else if score >= 70 {
            SleepCategory::Good
        } else if score >= 50 {
            SleepCategory::Fair
        } else {
            SleepCategory::Poor
        }
    }
}

impl fmt::Display for SleepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepCategory::Poor => write!(f, "Poor"),
            SleepCategory::Fair => write!(f, "Fair"),
            SleepCategory::Good => write!(f, "Good"),
            SleepCategory::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Sleep score for one recorded session with its component breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    /// Date the score applies to (morning of waking)
    pub date: NaiveDate,

    /// Overall sleep score in [0, 100]
    pub score: u8,

    /// Duration component before weighting, in [0, 100]
    pub duration_score: f64,

    /// Efficiency component before weighting, in [0, 100]
    pub efficiency_score: f64,

    /// Stage-quality component before weighting, in [0, 100]
    pub stage_score: f64,

    /// Total asleep time in minutes
    pub total_duration_minutes: f64,

    /// Personalized sleep-need target in minutes
    pub sleep_need_minutes: f64,

    /// Sleep efficiency in [0, 1]
    pub efficiency: f64,

    /// Deep sleep in minutes
    pub deep_sleep_minutes: f64,

    /// REM sleep in minutes
    pub rem_sleep_minutes: f64,
}
