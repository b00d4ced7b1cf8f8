//! TOML-based application configuration.
//!
//! Stores the user's daily hour goal, the default focus label, and whether
//! the session timer should survive restarts. Stored at
//! `~/.config/discipline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, ValidationError};
use crate::timer::{validate_target_hours, DEFAULT_FOCUS, DEFAULT_TARGET_HOURS};

use super::data_dir;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_target_hours")]
    pub daily_target_hours: u32,
    #[serde(default = "default_focus")]
    pub default_focus: String,
    /// When true, the session timer is saved on exit and restored (paused)
    /// on the next run. Off by default: the original behavior is a fresh
    /// counter every run.
    #[serde(default)]
    pub persist_session: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/discipline/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
}

fn default_target_hours() -> u32 {
    DEFAULT_TARGET_HOURS
}

fn default_focus() -> String {
    DEFAULT_FOCUS.into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            daily_target_hours: default_target_hours(),
            default_focus: default_focus(),
            persist_session: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The configured daily goal, falling back to the default when the file
    /// holds an out-of-range value.
    pub fn daily_target_hours(&self) -> u32 {
        if validate_target_hours(self.timer.daily_target_hours).is_ok() {
            self.timer.daily_target_hours
        } else {
            DEFAULT_TARGET_HOURS
        }
    }

    /// Change the daily goal; rejects hours outside the enumerated set.
    pub fn set_daily_target(&mut self, hours: u32) -> Result<(), ValidationError> {
        validate_target_hours(hours)?;
        self.timer.daily_target_hours = hours;
        Ok(())
    }

    pub fn set_default_focus(&mut self, label: impl Into<String>) {
        self.timer.default_focus = label.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.daily_target_hours, 10);
        assert_eq!(parsed.timer.default_focus, "General Work");
        assert!(!parsed.timer.persist_session);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("[timer]\npersist_session = true\n").unwrap();
        assert_eq!(parsed.timer.daily_target_hours, 10);
        assert!(parsed.timer.persist_session);
    }

    #[test]
    fn set_daily_target_validates() {
        let mut cfg = Config::default();
        assert!(cfg.set_daily_target(7).is_err());
        assert_eq!(cfg.timer.daily_target_hours, 10);
        assert!(cfg.set_daily_target(5).is_ok());
        assert_eq!(cfg.timer.daily_target_hours, 5);
    }

    #[test]
    fn out_of_range_value_on_disk_falls_back() {
        let parsed: Config = toml::from_str("[timer]\ndaily_target_hours = 7\n").unwrap();
        assert_eq!(parsed.daily_target_hours(), 10);
    }
}
