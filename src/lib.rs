//! vitalrs: score calculation engine for daily health analytics
//!
//! Turns raw physiological time series (heart-rate samples, HRV samples,
//! sleep sessions, workout records) into three bounded, explainable daily
//! scores (Recovery 0-100, Strain 0-21, Sleep 0-100) plus the rolling
//! personal baselines those scores depend on.
//!
//! Every calculator is a pure, synchronous function over immutable inputs:
//! no I/O, no shared state, no clock. Data acquisition, persistence, and
//! transport belong to external collaborators that feed inputs in and carry
//! score records out.

pub mod baseline;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod recovery;
pub mod sleep;
pub mod stats;
pub mod strain;

// Re-export commonly used types for convenience
pub use models::*;
pub use baseline::{BaselineConfig, BaselineEngine};
pub use config::EngineConfig;
pub use engine::{
    BaselineComputing, DailyInput, DailyScores, RecoveryScoring, ScoreEngine, ScoreHistoryEntry,
    ScoreSyncBundle, SleepScoring, StrainScoring,
};
pub use recovery::{RecoveryCalculator, RecoveryConfig, RecoveryInput};
pub use sleep::{SleepCalculator, SleepConfig};
pub use strain::{StrainCalculator, StrainConfig, StrainInput};
pub use error::{Result, VitalError};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
