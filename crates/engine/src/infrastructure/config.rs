//! Watcher configuration.
//!
//! Defaults are compiled in. `from_env` overlays the few knobs a host may
//! want to flip without a rebuild.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const ENV_TRACK_GM_ACTIONS: &str = "GMWATCH_TRACK_GM_ACTIONS";
pub const ENV_SPEAKER_ALIAS: &str = "GMWATCH_SPEAKER_ALIAS";

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a boolean, got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("failed to read env file: {0}")]
    EnvFile(String),
}

/// A resource pool on the actor whose value changes are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedResource {
    /// Display label (e.g. "Focus")
    pub label: String,
    /// Slash-separated path under the actor's system data
    pub path: String,
}

impl TrackedResource {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Whether changes made by a GM are reported too
    pub track_gm_actions: bool,
    /// Speaker name sinks attach to posted lines
    pub speaker_alias: String,
    pub tracked_resources: Vec<TrackedResource>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            track_gm_actions: false,
            speaker_alias: "GM Surveillance".to_string(),
            tracked_resources: vec![TrackedResource::new("Focus", "resources/focus/value")],
        }
    }
}

impl WatchConfig {
    pub fn with_track_gm_actions(mut self, track: bool) -> Self {
        self.track_gm_actions = track;
        self
    }

    /// Defaults overlaid with process environment variables, falling back
    /// to a `.env` file found from the working directory upward.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv_iter() {
            Ok(entries) => Self::from_dotenv(entries),
            Err(err) if err.not_found() => Self::from_lookup(|key| std::env::var(key).ok()),
            Err(err) => Err(ConfigError::EnvFile(err.to_string())),
        }
    }

    /// Like `from_env`, reading the given env file instead of searching.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let entries =
            dotenvy::from_path_iter(path).map_err(|err| ConfigError::EnvFile(err.to_string()))?;
        Self::from_dotenv(entries)
    }

    /// Process environment wins over file entries, as with `dotenvy::dotenv`.
    fn from_dotenv<R: Read>(entries: dotenvy::Iter<R>) -> Result<Self, ConfigError> {
        let file: HashMap<String, String> = entries
            .collect::<Result<_, _>>()
            .map_err(|err| ConfigError::EnvFile(err.to_string()))?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TRACK_GM_ACTIONS) {
            config.track_gm_actions = parse_bool(ENV_TRACK_GM_ACTIONS, &raw)?;
        }
        if let Some(alias) = lookup(ENV_SPEAKER_ALIAS).filter(|a| !a.trim().is_empty()) {
            config.speaker_alias = alias.trim().to_string();
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}
