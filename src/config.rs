//! User settings
//!
//! Read from `{config-dir}/wordwell/config.toml`. Every field is optional;
//! a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::stats::MAX_FORECAST_DAYS;
use crate::clock::Calendar;
use crate::quiz::DEFAULT_QUESTION_LIMIT;
use crate::review::queue::DEFAULT_DUE_BUFFER_SECS;
use crate::vocab::{CategoryFilter, ALL_CATEGORIES};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),

    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Largest accepted `due_buffer_secs` (one day)
pub const MAX_DUE_BUFFER_SECS: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where vocabulary and activity are stored (default: platform data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Offset used for day boundaries, minutes east of UTC (default: local)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
    /// Questions per quiz
    pub quiz_length: u32,
    /// Slack when deciding whether an item is due
    pub due_buffer_secs: i64,
    /// Days shown in the review forecast, today included
    pub forecast_days: u32,
    /// Category used when none is given
    pub default_category: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            utc_offset_minutes: None,
            quiz_length: DEFAULT_QUESTION_LIMIT,
            due_buffer_secs: DEFAULT_DUE_BUFFER_SECS,
            forecast_days: 4,
            default_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl Settings {
    /// Calendar for day boundaries
    pub fn calendar(&self) -> Result<Calendar> {
        match self.utc_offset_minutes {
            Some(minutes) => {
                Calendar::with_offset_minutes(minutes).ok_or(ConfigError::InvalidOffset(minutes))
            }
            None => Ok(Calendar::local()),
        }
    }

    pub fn due_buffer(&self) -> Duration {
        Duration::seconds(self.due_buffer_secs.clamp(0, MAX_DUE_BUFFER_SECS))
    }

    /// Check numeric fields against their accepted ranges
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_DUE_BUFFER_SECS).contains(&self.due_buffer_secs) {
            return Err(ConfigError::OutOfRange {
                field: "due_buffer_secs",
                value: self.due_buffer_secs,
                max: MAX_DUE_BUFFER_SECS,
            });
        }
        if self.forecast_days > MAX_FORECAST_DAYS {
            return Err(ConfigError::OutOfRange {
                field: "forecast_days",
                value: i64::from(self.forecast_days),
                max: i64::from(MAX_FORECAST_DAYS),
            });
        }
        self.calendar()?;
        Ok(())
    }

    pub fn category_filter(&self) -> CategoryFilter {
        CategoryFilter::parse(&self.default_category)
    }
}

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wordwell").join("config.toml"))
}

/// Load and validate settings, falling back to defaults when the file does
/// not exist
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        log::debug!("No config at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings to file
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(settings)?)?;
    Ok(())
}
