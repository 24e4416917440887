//! Timer configuration.
//!
//! The configuration can be read from a JSON file; every field is optional
//! and falls back to its default. Command-line flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DurationInput;

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "alarm-timer";

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.json";

fn default_minutes() -> u32 {
    1
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_highlight_ms() -> u64 {
    1000
}

fn default_preview_ms() -> u64 {
    1000
}

fn default_sound_enabled() -> bool {
    true
}

/// Errors raised while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("設定ファイルを読み込めません: {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `TimerConfig`.
    #[error("設定ファイルの形式が不正です: {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of range.
    #[error("設定値が不正です: {0}")]
    Invalid(String),
}

/// Configuration for the alarm timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Initial minutes
    #[serde(default = "default_minutes")]
    pub minutes: u32,
    /// Initial seconds
    #[serde(default)]
    pub seconds: u32,
    /// Tick cadence in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How long the alarm name stays highlighted after an expiry
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    /// Length of the preview played after an upload
    #[serde(default = "default_preview_ms")]
    pub preview_ms: u64,
    /// Whether sounds play at all
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            minutes: default_minutes(),
            seconds: 0,
            tick_interval_ms: default_tick_interval_ms(),
            highlight_ms: default_highlight_ms(),
            preview_ms: default_preview_ms(),
            sound_enabled: default_sound_enabled(),
        }
    }
}

impl TimerConfig {
    /// Returns the configuration with the given initial duration.
    pub fn with_duration(mut self, minutes: u32, seconds: u32) -> Self {
        self.minutes = minutes;
        self.seconds = seconds;
        self
    }

    /// Returns the configuration with the given tick cadence.
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    /// Returns the configuration with sound enabled or muted.
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Returns the initial duration in seconds (at least one second).
    pub fn duration_seconds(&self) -> u32 {
        DurationInput::from_parts(self.minutes, self.seconds).total_seconds()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a cadence is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms は1以上を指定してください".to_string(),
            ));
        }
        if self.highlight_ms == 0 {
            return Err(ConfigError::Invalid(
                "highlight_ms は1以上を指定してください".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the file at `path`, or the default file if it exists, or the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is present but invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Returns `<config_dir>/alarm-timer/config.json`, if a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
