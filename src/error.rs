//! Unified error hierarchy for the score engine
//!
//! The engine favors total functions: missing or degenerate data yields
//! defined sentinel outputs, never an error. What does surface here is
//! invalid configuration — a zero max heart rate or non-positive sleep need
//! would otherwise turn into a confidently wrong score.

use crate::recovery::RecoveryError;
use crate::sleep::SleepError;
use crate::strain::StrainError;
use thiserror::Error;

/// Top-level error type for all score-engine operations
#[derive(Debug, Error)]
pub enum VitalError {
    /// Strain calculation errors
    #[error("Strain error: {0}")]
    Strain(#[from] StrainError),

    /// Sleep calculation errors
    #[error("Sleep error: {0}")]
    Sleep(#[from] SleepError),

    /// Recovery calculation errors
    #[error("Recovery error: {0}")]
    Recovery(#[from] RecoveryError),

    /// Engine configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for score-engine operations
pub type Result<T> = std::result::Result<T, VitalError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation but the app can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl VitalError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VitalError::Configuration(_) => ErrorSeverity::Error,
            _ => ErrorSeverity::Warning,
        }
    }

    /// Convert severity to a tracing level
    pub fn tracing_level(&self) -> tracing::Level {
        match self.severity() {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalError::Strain(StrainError::InvalidMaxHeartRate(bpm)) => {
                format!("Your max heart rate of {} bpm looks wrong. Please update your profile.", bpm)
            }
            VitalError::Sleep(SleepError::InvalidSleepNeed(minutes)) => {
                format!("Your sleep need of {} minutes looks wrong. Please update your profile.", minutes)
            }
            _ => self.to_string(),
        }
    }
}
