use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::baseline::BaselineConfig;
use crate::error::VitalError;
use crate::recovery::RecoveryConfig;
use crate::sleep::SleepConfig;
use crate::strain::StrainConfig;

/// User profile values the calculators need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Maximum heart rate in bpm
    pub max_heart_rate: u16,

    /// Personalized sleep-need target in minutes
    pub sleep_need_minutes: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            max_heart_rate: 190,
            sleep_need_minutes: 480.0,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: String,

    /// User profile values
    pub profile: ProfileConfig,

    /// Baseline engine settings
    pub baseline: BaselineConfig,

    /// Strain calculator settings
    pub strain: StrainConfig,

    /// Sleep calculator settings
    pub sleep: SleepConfig,

    /// Recovery calculator settings
    pub recovery: RecoveryConfig,
}

impl EngineConfig {
    /// Validate the configuration before it reaches a calculator
    ///
    /// Invalid configuration is the one failure class this engine surfaces:
    /// a zero max heart rate or negative sleep need would otherwise come out
    /// the other end as a confidently wrong score.
    pub fn validate(&self) -> std::result::Result<(), VitalError> {
        if !(100..=250).contains(&self.profile.max_heart_rate) {
            return Err(VitalError::Configuration(format!(
                "max heart rate {} bpm outside the plausible 100-250 range",
                self.profile.max_heart_rate
            )));
        }
        if !(self.profile.sleep_need_minutes.is_finite() && self.profile.sleep_need_minutes > 0.0) {
            return Err(VitalError::Configuration(format!(
                "sleep need must be positive, got {} minutes",
                self.profile.sleep_need_minutes
            )));
        }
        if self.baseline.window_days == 0 {
            return Err(VitalError::Configuration(
                "baseline window must be at least one day".to_string(),
            ));
        }

        let sleep_weights = self.sleep.duration_weight
            + self.sleep.efficiency_weight
            + self.sleep.stage_weight;
        if (sleep_weights - 1.0).abs() > 1e-6 {
            return Err(VitalError::Configuration(format!(
                "sleep component weights must sum to 1.0, got {sleep_weights}"
            )));
        }

        let recovery_weights =
            self.recovery.hrv_weight + self.recovery.rhr_weight + self.recovery.sleep_weight;
        if (recovery_weights - 1.0).abs() > 1e-6 {
            return Err(VitalError::Configuration(format!(
                "recovery component weights must sum to 1.0, got {recovery_weights}"
            )));
        }
        if self.recovery.deviation_clamp <= 0.0 {
            return Err(VitalError::Configuration(
                "recovery deviation clamp must be positive".to_string(),
            ));
        }
        if self.strain.load_scale <= 0.0 || self.strain.saturation_load <= 0.0 {
            return Err(VitalError::Configuration(
                "strain compression constants must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: EngineConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vitalrs")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_config_path()).unwrap_or_default()
    }
}
