//! Player-editable settings, read from `settings.json` in the working directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::game::Difficulty;

pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_GRAVITY: f32 = 300.0; // pixels/sec^2, y down

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GameSettings {
    /// 0 = relaxed, 1 = normal, 2 = hard, 3 = expert
    pub difficulty: Difficulty,
    pub music_volume: f32,
    pub effects_volume: f32,
    pub gravity: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            music_volume: 1.0,
            effects_volume: 1.0,
            gravity: DEFAULT_GRAVITY,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Cannot read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Volumes are clamped to 0..=1; a non-positive gravity falls back to the default
    fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.effects_volume = self.effects_volume.clamp(0.0, 1.0);
        if self.gravity.is_nan() || self.gravity <= 0.0 {
            self.gravity = DEFAULT_GRAVITY;
        }
        self
    }
}

/// Read the settings file, falling back to defaults when it is missing or broken
pub fn load_settings() -> GameSettings {
    match GameSettings::load(Path::new(SETTINGS_FILE)) {
        Ok(settings) => {
            info!("Loaded {}: {:?}", SETTINGS_FILE, settings);
            settings
        }
        Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("No {} found, using default settings", SETTINGS_FILE);
            GameSettings::default()
        }
        Err(e) => {
            warn!("{}; using default settings", e);
            GameSettings::default()
        }
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_settings());
    }
}
