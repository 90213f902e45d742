//! Driver settings and key bindings
//!
//! Persisted separately from tuning; a missing or broken file falls back to defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUBSTEPS;
use crate::input::Action;

/// Errors that can occur while reading configuration files
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(std::io::Error),
    /// File contents are not valid JSON for the expected shape
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "Config read failed: {}", err),
            ConfigError::Parse(err) => write!(f, "Config parse failed: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Driver settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key code (DOM-style, e.g. "ArrowLeft") to logical action
    pub bindings: BTreeMap<String, Action>,
    /// Maximum fixed ticks run per rendered frame
    pub max_substeps: u32,
    /// Longest frame delta (seconds) fed to the accumulator
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let bindings = [
            ("ArrowLeft", Action::MoveLeft),
            ("ArrowRight", Action::MoveRight),
            ("KeyA", Action::MoveLeft),
            ("KeyD", Action::MoveRight),
            ("Space", Action::Jump),
            ("ArrowUp", Action::Jump),
            ("KeyZ", Action::Throw),
            ("Enter", Action::Start),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();

        Self {
            bindings,
            max_substeps: MAX_SUBSTEPS,
            max_frame_dt: 0.1,
        }
    }
}

impl Settings {
    /// Logical action bound to a key code, if any
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
