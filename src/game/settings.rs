use log::error;
use serde::{Deserialize, Serialize};

use crate::game::storage::{Storage, SETTINGS_KEY};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    #[serde(default = "default_true")]
    pub show_hints: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub animation_speed: AnimationSpeed,
}

// Helper functions for default values
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            sound_enabled: true,
            show_hints: true,
            theme: Theme::Light,
            animation_speed: AnimationSpeed::Normal,
        }
    }
}

impl Settings {
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(blob) = storage.load(SETTINGS_KEY) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&blob) {
                settings.migrate();
                return settings;
            }
        }
        Settings::default()
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(blob) => {
                if let Err(err) = storage.save(SETTINGS_KEY, &blob) {
                    error!(target: "settings", "Failed to persist settings: {}", err);
                }
            }
            Err(err) => error!(target: "settings", "Failed to encode settings: {}", err),
        }
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse().ok())
    }
}
