//! Player preferences
//!
//! Stored as a small JSON file next to the high score. A missing or
//! unreadable file falls back to defaults; a failed save is logged and
//! otherwise ignored so preferences never take the game down.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub master_volume: f32,
    pub sfx_volume: f32,
    /// Debug overlay drawing every hit circle
    pub show_hitboxes: bool,
    pub mute_on_blur: bool,
    /// Shortens the gold payout screen flash
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            show_hitboxes: false,
            mute_on_blur: true,
            reduced_flash: false,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("settings file is malformed ({err}), using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("no settings file ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize settings: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            log::warn!("could not save settings to {}: {err}", path.display());
        }
    }

    /// Volumes clamped to the unit range, applied before mixing
    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
    }
}
