//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Interval lengths and the long-break cadence
//! - Notification preferences
//! - Autosave cadence
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{
    Durations, DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS, DEFAULT_LONG_BREAK_EVERY,
    DEFAULT_LONG_BREAK_SECS,
};

const CONFIG_FILE: &str = "config.toml";

/// Longest accepted autosave interval: one day.
pub const MAX_AUTOSAVE_INTERVAL_SECS: u64 = 86_400;

/// Timer-specific configuration. All durations are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_duration")]
    pub focus_duration_secs: u64,
    #[serde(default = "default_break_duration")]
    pub break_duration_secs: u64,
    #[serde(default = "default_long_break_duration")]
    pub long_break_duration_secs: u64,
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell on completion.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_autosave_interval")]
    pub autosave_interval_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// Default functions
fn default_focus_duration() -> u64 {
    DEFAULT_FOCUS_SECS
}
fn default_break_duration() -> u64 {
    DEFAULT_BREAK_SECS
}
fn default_long_break_duration() -> u64 {
    DEFAULT_LONG_BREAK_SECS
}
fn default_long_break_every() -> u64 {
    DEFAULT_LONG_BREAK_EVERY
}
fn default_true() -> bool {
    true
}
fn default_autosave_interval() -> u64 {
    30
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_duration_secs: default_focus_duration(),
            break_duration_secs: default_break_duration(),
            long_break_duration_secs: default_long_break_duration(),
            long_break_every: default_long_break_every(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bell: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            autosave_interval_secs: default_autosave_interval(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            notifications: NotificationsConfig::default(),
            storage: StorageConfig::default(),
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

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                break;
            }
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from(CONFIG_FILE),
            message: e.to_string(),
        })?;
        Ok(dir.join(CONFIG_FILE))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// The change is only applied if the resulting configuration is valid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result is invalid, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durations().validate()?;
        let autosave = self.storage.autosave_interval_secs;
        if autosave == 0 || autosave > MAX_AUTOSAVE_INTERVAL_SECS {
            return Err(ConfigError::InvalidValue {
                key: "storage.autosave_interval_secs".into(),
                message: format!("must be between 1 and {MAX_AUTOSAVE_INTERVAL_SECS} seconds"),
            });
        }
        Ok(())
    }

    /// Interval lengths for the timer engine. Not validated here; the
    /// engine rejects invalid values at construction.
    pub fn durations(&self) -> Durations {
        Durations {
            focus_secs: self.timer.focus_duration_secs,
            break_secs: self.timer.break_duration_secs,
            long_break_secs: self.timer.long_break_duration_secs,
            long_break_every: self.timer.long_break_every,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
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
        assert_eq!(parsed.timer.focus_duration_secs, 1500);
        assert!(parsed.notifications.bell);
        assert_eq!(parsed.storage.autosave_interval_secs, 30);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str("[timer]\nfocus_duration_secs = 60\n").unwrap();
        assert_eq!(parsed.timer.focus_duration_secs, 60);
        assert_eq!(parsed.timer.break_duration_secs, 300);
        assert_eq!(parsed.timer.long_break_duration_secs, 900);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.bell").as_deref(), Some("true"));
        assert_eq!(cfg.get("timer.focus_duration_secs").as_deref(), Some("1500"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("timer").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "notifications.enabled", "false").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "notifications.enabled").unwrap(),
            &serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "timer.break_duration_secs", "600").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "timer.break_duration_secs").unwrap(),
            &serde_json::Value::Number(600.into())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "timer.nonexistent_key", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "notifications.bell", "loud");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn apply_rejects_zero_duration_and_keeps_old_value() {
        let mut cfg = Config::default();
        let result = cfg.apply("timer.focus_duration_secs", "0");
        assert!(matches!(result, Err(ConfigError::InvalidDuration { .. })));
        assert_eq!(cfg.timer.focus_duration_secs, 1500);
    }

    #[test]
    fn apply_rejects_zero_autosave_interval() {
        let mut cfg = Config::default();
        assert!(cfg.apply("storage.autosave_interval_secs", "0").is_err());
        assert_eq!(cfg.storage.autosave_interval_secs, 30);
    }

    #[test]
    fn apply_rejects_autosave_interval_longer_than_a_day() {
        let mut cfg = Config::default();
        let result = cfg.apply("storage.autosave_interval_secs", "9223372036854775807");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert!(cfg.apply("storage.autosave_interval_secs", "86401").is_err());
        assert_eq!(cfg.storage.autosave_interval_secs, 30);

        cfg.apply("storage.autosave_interval_secs", "86400").unwrap();
        assert_eq!(cfg.storage.autosave_interval_secs, 86_400);
    }

    #[test]
    fn validate_catches_hand_edited_autosave_interval() {
        let parsed: Config =
            toml::from_str("[storage]\nautosave_interval_secs = 9223372036854775807\n").unwrap();
        assert!(matches!(
            parsed.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn durations_follow_timer_section() {
        let mut cfg = Config::default();
        cfg.apply("timer.long_break_duration_secs", "1200").unwrap();
        let d = cfg.durations();
        assert_eq!(d.long_break_secs, 1200);
        assert_eq!(d.focus_secs, 1500);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.focus_duration_secs, 1500);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("notifications.bell", "false").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.notifications.bell);
    }
}
