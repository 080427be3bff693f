//! Wizard configuration.
//!
//! Small, persisted knobs for the intake flow. Loaded from the platform
//! config directory; a default file is written on first run.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_code_length() -> usize {
    6
}

fn default_code_ttl_secs() -> u64 {
    600 // 10 minutes
}

fn default_facility_radius_miles() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Digits in the one-time verification code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds before an issued code expires
    #[serde(default = "default_code_ttl_secs")]
    pub code_ttl_secs: u64,

    /// Search radius for the nearby-facility lookup
    #[serde(default = "default_facility_radius_miles")]
    pub facility_radius_miles: f64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_secs: default_code_ttl_secs(),
            facility_radius_miles: default_facility_radius_miles(),
        }
    }
}

impl WizardConfig {
    /// Load configuration from the platform-specific config directory.
    /// Creates a default config file if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            let config: WizardConfig =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;
            config.validate()?;

            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = WizardConfig::default();
            config.save()?;
            tracing::info!("created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Reject values the wizard cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=9).contains(&self.code_length) {
            return Err(ConfigError::Invalid(format!(
                "code_length must be 4-9 digits, got {}",
                self.code_length
            )));
        }
        if self.code_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "code_ttl_secs must be positive".to_string(),
            ));
        }
        if self.facility_radius_miles <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "facility_radius_miles must be positive, got {}",
                self.facility_radius_miles
            )));
        }
        Ok(())
    }

    /// Get the config file path (in the platform config directory)
    fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Invalid("could not determine config directory".to_string())
        })?;
        Ok(dir.join("triage-intake").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = WizardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.code_length, 6);
        assert_eq!(config.code_ttl_secs, 600);
    }

    #[test]
    fn test_config_serialization() {
        let config = WizardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: WizardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: WizardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = WizardConfig {
            code_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = WizardConfig {
            code_ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = WizardConfig {
            facility_radius_miles: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
