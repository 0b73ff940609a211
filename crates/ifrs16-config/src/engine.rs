//! Top-level engine configuration and file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::policy::{NormalizationConfig, NormalizationMode};
use crate::schedule::ScheduleConfig;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document
    Toml,
    /// JSON document
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete configuration of the schedule engine.
///
/// # Example
///
/// ```rust
/// use ifrs16_config::{EngineConfig, NormalizationMode, Validate};
///
/// let config = EngineConfig::from_toml_str(r#"
///     [normalization]
///     mode = "strict"
///
///     [schedule]
///     current_window_months = 12
/// "#).unwrap();
///
/// assert_eq!(config.normalization.mode, NormalizationMode::Strict);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Input normalization settings.
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Schedule computation settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl EngineConfig {
    /// Lenient normalization, standard schedule settings.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict normalization, standard schedule settings.
    pub fn strict() -> Self {
        Self {
            normalization: NormalizationConfig::strict(),
            schedule: ScheduleConfig::default(),
        }
    }

    /// Returns a copy with the given normalization mode.
    pub fn with_mode(mut self, mode: NormalizationMode) -> Self {
        self.normalization.mode = mode;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        match format {
            ConfigFormat::Toml => Self::from_toml_str(&contents),
            ConfigFormat::Json => Self::from_json_str(&contents),
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.normalization.validate();
        errors.extend(self.schedule.validate());
        errors
    }
}
