//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Day start time for the timeline
//! - Duration given to newly added tasks
//! - Whether an empty day is seeded with the sample plan
//! - Display name of the user
//!
//! Configuration is stored at `~/.config/dayblock/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::task::DEFAULT_DURATION_MINUTES;
use crate::planner::DEFAULT_DAY_START_MINUTE;
use crate::timeline::{minutes_to_time, time_to_minutes};

/// Planner-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// `HH:MM` time the first scheduled task starts at
    #[serde(default = "default_day_start")]
    pub day_start: String,
    /// Minutes given to a freshly added task
    #[serde(default = "default_duration")]
    pub default_duration: i32,
    #[serde(default)]
    pub seed_sample_day: bool,
}

/// User profile configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayblock/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_day_start() -> String {
    minutes_to_time(DEFAULT_DAY_START_MINUTE)
}
fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES
}
fn default_name() -> String {
    "Planner".into()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            default_duration: default_duration(),
            seed_sample_day: false,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let unknown = || ConfigError::UnknownKey(key.to_string());

        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent) = parent {
            for part in parent.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<i64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot replace a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Location of the config file in the data directory.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, or return defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or return defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(load_failed(err.to_string())),
        };

        let cfg: Config = toml::from_str(&content).map_err(|err| load_failed(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };

        let content = toml::to_string_pretty(self).map_err(|err| save_failed(err.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| save_failed(err.to_string()))?;
        }
        std::fs::write(path, content).map_err(|err| save_failed(err.to_string()))?;
        Ok(())
    }

    /// Checks values that serde alone cannot constrain.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a malformed day start or a
    /// negative default duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        time_to_minutes(&self.planner.day_start).map_err(|err| ConfigError::InvalidValue {
            key: "planner.day_start".into(),
            message: err.to_string(),
        })?;
        if self.planner.default_duration < 0 {
            return Err(ConfigError::InvalidValue {
                key: "planner.default_duration".into(),
                message: format!("{} is negative", self.planner.default_duration),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. The config is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|err| invalid(err.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|err| invalid(err.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
