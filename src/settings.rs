//! Game settings and preferences
//!
//! Persisted as pretty-printed JSON. Every field has a default, so a partial
//! file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::AssetPaths;
use crate::audio::Mixer;
use crate::error::ConfigError;
use crate::platform::{KeyBindingConfig, KeyBindings};
use crate::sim::Difficulty;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the splash screen before the menu
    pub show_start_screen: bool,
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
    /// Difficulty the headless driver picks in the menu
    pub autoplay_difficulty: Difficulty,

    // === Input ===
    pub key_bindings: KeyBindingConfig,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Assets ===
    pub assets: AssetPaths,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_start_screen: true,
            seed: None,
            autoplay_difficulty: Difficulty::Medium,

            key_bindings: KeyBindingConfig::default(),

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            assets: AssetPaths::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        KeyBindings::from_config(&self.key_bindings)
    }

    pub fn mixer(&self) -> Mixer {
        Mixer {
            master_volume: self.master_volume,
            sfx_volume: self.sfx_volume,
            music_volume: self.music_volume,
            muted: self.muted,
        }
    }
}
