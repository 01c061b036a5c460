//! Engine composition and the daily scoring entry point
//!
//! The calculators are stateless and independently instantiable; this module
//! wires them together behind one capability trait per calculator so call
//! sites depend on behavior, not on concrete types, and a test double can be
//! substituted for any component. There is no ambient shared state: every
//! piece of history the engine needs arrives in the call.

use crate::baseline::BaselineEngine;
use crate::error::Result;
use crate::models::{
    HeartRateSample, RecoveryScore, SleepScore, SleepSession, StrainScore, UserBaseline,
    WorkoutSession,
};
use crate::recovery::{RecoveryCalculator, RecoveryError, RecoveryInput};
use crate::sleep::{SleepCalculator, SleepError};
use crate::strain::{StrainCalculator, StrainError, StrainInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Capability: compute rolling baselines from daily history
pub trait BaselineComputing {
    fn calculate_baseline(
        &self,
        hrv_history: &[f64],
        rhr_history: &[f64],
        date: NaiveDate,
    ) -> Option<UserBaseline>;
}

impl BaselineComputing for BaselineEngine {
    fn calculate_baseline(
        &self,
        hrv_history: &[f64],
        rhr_history: &[f64],
        date: NaiveDate,
    ) -> Option<UserBaseline> {
        BaselineEngine::calculate_baseline(self, hrv_history, rhr_history, date)
    }
}

/// Capability: score a day's cardiovascular strain
pub trait StrainScoring {
    fn strain_score(&self, input: &StrainInput<'_>) -> std::result::Result<StrainScore, StrainError>;
}

impl StrainScoring for StrainCalculator {
    fn strain_score(&self, input: &StrainInput<'_>) -> std::result::Result<StrainScore, StrainError> {
        self.calculate(input)
    }
}

/// Capability: score one recorded sleep session
pub trait SleepScoring {
    fn sleep_score(
        &self,
        session: &SleepSession,
        sleep_need_minutes: f64,
        date: NaiveDate,
    ) -> std::result::Result<SleepScore, SleepError>;
}

impl SleepScoring for SleepCalculator {
    fn sleep_score(
        &self,
        session: &SleepSession,
        sleep_need_minutes: f64,
        date: NaiveDate,
    ) -> std::result::Result<SleepScore, SleepError> {
        self.calculate(session, sleep_need_minutes, date)
    }
}

/// Capability: score daily recovery against an established baseline
pub trait RecoveryScoring {
    fn recovery_score(&self, input: &RecoveryInput) -> std::result::Result<RecoveryScore, RecoveryError>;
}

impl RecoveryScoring for RecoveryCalculator {
    fn recovery_score(&self, input: &RecoveryInput) -> std::result::Result<RecoveryScore, RecoveryError> {
        self.calculate(input)
    }
}

/// Everything known about one day, as supplied by the sensor/history provider
///
/// `heart_rate_samples` must exclude samples that belong to a workout in
/// `workouts`; histories are ordered oldest first and do not include today.
#[derive(Debug, Clone)]
pub struct DailyInput<'a> {
    /// Date being scored
    pub date: NaiveDate,

    /// All-day heart-rate stream outside workouts
    pub heart_rate_samples: &'a [HeartRateSample],

    /// Workouts completed during the day
    pub workouts: &'a [WorkoutSession],

    /// Last night's sleep session, if one was recorded
    pub sleep_session: Option<&'a SleepSession>,

    /// Today's HRV (SDNN) reading in milliseconds, if taken
    pub current_hrv_ms: Option<f64>,

    /// Today's resting heart rate in bpm, if taken
    pub current_rhr_bpm: Option<f64>,

    /// Historical daily HRV values feeding the baseline
    pub hrv_history: &'a [f64],

    /// Historical daily RHR values feeding the baseline
    pub rhr_history: &'a [f64],

    /// User's maximum heart rate in bpm
    pub max_heart_rate: u16,

    /// Personalized sleep-need target in minutes
    pub sleep_need_minutes: f64,
}

/// The three daily scores plus the baseline they were computed against
///
/// `recovery` is `None` when the baseline is not yet established or no
/// HRV/RHR reading was taken; `sleep` is `None` when no session was
/// recorded. Neither case is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyScores {
    pub date: NaiveDate,
    pub baseline: Option<UserBaseline>,
    pub strain: StrainScore,
    pub sleep: Option<SleepScore>,
    pub recovery: Option<RecoveryScore>,
}

/// One line of recent score history carried in the sync bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub date: NaiveDate,
    pub recovery_score: Option<u8>,
    pub strain_score: Option<f64>,
    pub sleep_score: Option<u8>,
}

/// Payload handed to the persistence/sync collaborator for the
/// cross-device path
///
/// A plain structured record: serialization framing and transport belong to
/// the collaborator, not to this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSyncBundle {
    pub scores: DailyScores,
    pub baseline: Option<UserBaseline>,
    pub history: Vec<ScoreHistoryEntry>,
}

/// Composition of the four scoring components
///
/// Defaults to the concrete calculators; any component can be swapped for
/// an alternate implementation through its capability trait.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine<B = BaselineEngine, St = StrainCalculator, Sl = SleepCalculator, R = RecoveryCalculator>
{
    baseline: B,
    strain: St,
    sleep: Sl,
    recovery: R,
}

impl ScoreEngine {
    /// Engine with the default calculators and configurations
    pub fn new() -> Self {
        ScoreEngine {
            baseline: BaselineEngine::new(),
            strain: StrainCalculator::new(),
            sleep: SleepCalculator::new(),
            recovery: RecoveryCalculator::new(),
        }
    }
}

impl<B, St, Sl, R> ScoreEngine<B, St, Sl, R>
where
    B: BaselineComputing,
    St: StrainScoring,
    Sl: SleepScoring,
    R: RecoveryScoring,
{
    /// Compose an engine from explicit components
    pub fn with_components(baseline: B, strain: St, sleep: Sl, recovery: R) -> Self {
        ScoreEngine {
            baseline,
            strain,
            sleep,
            recovery,
        }
    }

    /// Compute every score the day's data supports
    ///
    /// Pure and idempotent: identical input yields identical output, so the
    /// caller may recompute freely as samples arrive intraday; each result
    /// replaces the previous one.
    pub fn scores_for_day(&self, input: &DailyInput<'_>) -> Result<DailyScores> {
        let baseline =
            self.baseline
                .calculate_baseline(input.hrv_history, input.rhr_history, input.date);

        let strain = self.strain.strain_score(&StrainInput {
            date: input.date,
            samples: input.heart_rate_samples,
            workouts: input.workouts,
            max_heart_rate: input.max_heart_rate,
        })?;

        let sleep = input
            .sleep_session
            .map(|session| {
                self.sleep
                    .sleep_score(session, input.sleep_need_minutes, input.date)
            })
            .transpose()?;

        let recovery = match (&baseline, input.current_hrv_ms, input.current_rhr_bpm) {
            (Some(baseline), Some(hrv), Some(rhr)) => Some(self.recovery.recovery_score(
                &RecoveryInput {
                    date: input.date,
                    current_hrv_ms: hrv,
                    current_rhr_bpm: rhr,
                    baseline: baseline.clone(),
                    sleep_quality: sleep.as_ref().map(|s| f64::from(s.score)),
                },
            )?),
            (None, _, _) => {
                tracing::info!(date = %input.date, "recovery skipped: baseline not established");
                None
            }
            _ => {
                tracing::info!(date = %input.date, "recovery skipped: no HRV/RHR reading");
                None
            }
        };

        tracing::info!(
            date = %input.date,
            strain = strain.score,
            sleep = sleep.as_ref().map(|s| s.score),
            recovery = recovery.as_ref().map(|r| r.score),
            "daily scores computed"
        );

        Ok(DailyScores {
            date: input.date,
            baseline,
            strain,
            sleep,
            recovery,
        })
    }

    /// Bundle a day's scores with recent history for cross-device sync
    pub fn sync_bundle(
        &self,
        scores: &DailyScores,
        history: &[ScoreHistoryEntry],
    ) -> ScoreSyncBundle {
        ScoreSyncBundle {
            scores: scores.clone(),
            baseline: scores.baseline.clone(),
            history: history.to_vec(),
        }
    }
}
