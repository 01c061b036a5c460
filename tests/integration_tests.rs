use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;
use vitalrs::{
    ActivityType, DailyInput, HeartRateSample, SampleSource, ScoreEngine, ScoreHistoryEntry,
    SleepSession, StrainCategory, WorkoutSession,
};

/// Integration tests that exercise the complete daily scoring workflow

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn score_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap()
    }

    fn minute_samples(start: DateTime<Utc>, bpm: u16, count: usize) -> Vec<HeartRateSample> {
        (0..count)
            .map(|i| HeartRateSample {
                timestamp: start + Duration::seconds(60 * i as i64),
                beats_per_minute: bpm,
                source: SampleSource::Watch,
            })
            .collect()
    }

    fn last_night() -> SleepSession {
        let start = Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();
        SleepSession {
            start,
            end: start + Duration::minutes(480),
            deep_minutes: 90.0,
            rem_minutes: 110.0,
            light_minutes: 250.0,
            awake_minutes: 30.0,
        }
    }

    fn evening_run() -> WorkoutSession {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
        WorkoutSession {
            id: Uuid::new_v4(),
            activity: ActivityType::Running,
            start,
            end: start + Duration::minutes(40),
            samples: minute_samples(start, 165, 40),
        }
    }

    /// A settled user with a week of history gets all three scores
    #[test]
    fn test_complete_day_workflow() {
        let engine = ScoreEngine::new();

        let hrv_history = [48.0, 50.0, 52.0, 49.0, 51.0, 50.0, 50.0];
        let rhr_history = [56.0, 55.0, 54.0, 55.0, 56.0, 55.0, 54.0];
        let day_stream = minute_samples(morning(), 115, 60);
        let sleep = last_night();
        let workout = evening_run();

        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &day_stream,
            workouts: std::slice::from_ref(&workout),
            sleep_session: Some(&sleep),
            current_hrv_ms: Some(54.0),
            current_rhr_bpm: Some(53.0),
            hrv_history: &hrv_history,
            rhr_history: &rhr_history,
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };

        let scores = engine.scores_for_day(&input).unwrap();

        let baseline = scores.baseline.as_ref().expect("baseline established");
        assert_eq!(baseline.window_days, 7);
        assert!(baseline.hrv_baseline_ms > 45.0 && baseline.hrv_baseline_ms < 55.0);

        assert!(scores.strain.score > 0.0 && scores.strain.score <= 21.0);
        assert_eq!(scores.strain.workout_contributions.len(), 1);
        // 40 minutes at 165 bpm of max 190 is zone 4: a solid run
        assert!(scores.strain.zone_minutes.zone4 >= 40.0);

        let sleep_score = scores.sleep.as_ref().expect("sleep recorded");
        assert!(sleep_score.score <= 100);

        let recovery = scores.recovery.as_ref().expect("recovery computed");
        assert!(recovery.score <= 100);
        // Recovery consumed the already-computed sleep score, not the session
        assert_eq!(recovery.sleep_quality, f64::from(sleep_score.score));
        assert_eq!(recovery.hrv_baseline, baseline.hrv_baseline_ms);
    }

    /// A new user without history still gets strain and sleep, but no
    /// fabricated recovery
    #[test]
    fn test_new_user_workflow() {
        let engine = ScoreEngine::new();

        let day_stream = minute_samples(morning(), 125, 30);
        let sleep = last_night();

        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &day_stream,
            workouts: &[],
            sleep_session: Some(&sleep),
            current_hrv_ms: Some(54.0),
            current_rhr_bpm: Some(53.0),
            hrv_history: &[50.0, 51.0],
            rhr_history: &[55.0, 54.0],
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };

        let scores = engine.scores_for_day(&input).unwrap();

        assert!(scores.baseline.is_none());
        assert!(scores.recovery.is_none());
        assert!(scores.sleep.is_some());
        assert!(scores.strain.score > 0.0);
    }

    /// A rest day with the watch off the wrist scores zero strain, Light
    #[test]
    fn test_rest_day_workflow() {
        let engine = ScoreEngine::new();

        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &[],
            workouts: &[],
            sleep_session: None,
            current_hrv_ms: None,
            current_rhr_bpm: None,
            hrv_history: &[],
            rhr_history: &[],
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };

        let scores = engine.scores_for_day(&input).unwrap();
        assert_eq!(scores.strain.score, 0.0);
        assert_eq!(scores.strain.category, StrainCategory::Light);
        assert!(scores.sleep.is_none());
        assert!(scores.recovery.is_none());
    }

    /// Invalid profile configuration surfaces instead of producing a score
    #[test]
    fn test_invalid_configuration_surfaces() {
        let engine = ScoreEngine::new();
        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &[],
            workouts: &[],
            sleep_session: None,
            current_hrv_ms: None,
            current_rhr_bpm: None,
            hrv_history: &[],
            rhr_history: &[],
            max_heart_rate: 0,
            sleep_need_minutes: 460.0,
        };
        assert!(engine.scores_for_day(&input).is_err());

        let sleep = last_night();
        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &[],
            workouts: &[],
            sleep_session: Some(&sleep),
            current_hrv_ms: None,
            current_rhr_bpm: None,
            hrv_history: &[],
            rhr_history: &[],
            max_heart_rate: 190,
            sleep_need_minutes: 0.0,
        };
        assert!(engine.scores_for_day(&input).is_err());
    }

    /// Recomputing a day with identical inputs is bit-identical
    #[test]
    fn test_engine_idempotence() {
        let engine = ScoreEngine::new();

        let hrv_history = [48.0, 50.0, 52.0, 49.0, 51.0, 50.0, 50.0];
        let rhr_history = [56.0, 55.0, 54.0, 55.0, 56.0, 55.0, 54.0];
        let day_stream = minute_samples(morning(), 140, 50);
        let sleep = last_night();
        let workout = evening_run();

        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &day_stream,
            workouts: std::slice::from_ref(&workout),
            sleep_session: Some(&sleep),
            current_hrv_ms: Some(54.0),
            current_rhr_bpm: Some(53.0),
            hrv_history: &hrv_history,
            rhr_history: &rhr_history,
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };

        let first = engine.scores_for_day(&input).unwrap();
        let second = engine.scores_for_day(&input).unwrap();
        assert_eq!(first, second);
    }

    /// The sync bundle round-trips through plain JSON untouched
    #[test]
    fn test_sync_bundle_serialization_workflow() {
        let engine = ScoreEngine::new();

        let hrv_history = [48.0, 50.0, 52.0, 49.0, 51.0, 50.0, 50.0];
        let rhr_history = [56.0, 55.0, 54.0, 55.0, 56.0, 55.0, 54.0];
        let sleep = last_night();

        let input = DailyInput {
            date: score_date(),
            heart_rate_samples: &[],
            workouts: &[],
            sleep_session: Some(&sleep),
            current_hrv_ms: Some(54.0),
            current_rhr_bpm: Some(53.0),
            hrv_history: &hrv_history,
            rhr_history: &rhr_history,
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };

        let scores = engine.scores_for_day(&input).unwrap();
        let history: Vec<ScoreHistoryEntry> = (1..=3)
            .map(|i| ScoreHistoryEntry {
                date: score_date() - Duration::days(i),
                recovery_score: Some(60 + i as u8),
                strain_score: Some(10.0 + i as f64),
                sleep_score: Some(75),
            })
            .collect();

        let bundle = engine.sync_bundle(&scores, &history);
        let json = serde_json::to_string_pretty(&bundle).unwrap();
        let restored: vitalrs::ScoreSyncBundle = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, bundle);
        assert_eq!(restored.history.len(), 3);
        assert_eq!(restored.scores.date, score_date());
    }

    /// Intraday recomputation with more data replaces the earlier score
    #[test]
    fn test_intraday_recomputation_replaces() {
        let engine = ScoreEngine::new();

        let noon_stream = minute_samples(morning(), 140, 60);
        let full_stream = minute_samples(morning(), 140, 120);

        let noon_input = DailyInput {
            date: score_date(),
            heart_rate_samples: &noon_stream,
            workouts: &[],
            sleep_session: None,
            current_hrv_ms: None,
            current_rhr_bpm: None,
            hrv_history: &[],
            rhr_history: &[],
            max_heart_rate: 190,
            sleep_need_minutes: 460.0,
        };
        let evening_input = DailyInput {
            heart_rate_samples: &full_stream,
            ..noon_input.clone()
        };

        let noon = engine.scores_for_day(&noon_input).unwrap();
        let evening = engine.scores_for_day(&evening_input).unwrap();

        // More time in zone can only raise the day's strain
        assert!(evening.strain.score >= noon.strain.score);
        assert!(evening.strain.activity_minutes > noon.strain.activity_minutes);
    }
}
