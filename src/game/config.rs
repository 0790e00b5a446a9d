// User settings persisted to config.json

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::engine::input::{KeyAction, KeyBindings};

pub const CONFIG_FILE: &str = "config.json";

/// Frame caps the settings screen cycles through
pub const ALLOWED_FPS: [u32; 9] = [30, 60, 90, 120, 144, 165, 180, 200, 240];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config format error: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub key_bindings: KeyBindings,
    pub vsync: bool,
    pub fps_limit: u32,
    pub fullscreen: bool,
    pub window_size: [u32; 2],
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            vsync: true,
            fps_limit: 60,
            fullscreen: true,
            window_size: [1280, 720],
            music_volume: 0.7,
        }
    }
}

impl GameConfig {
    /// Load the config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load the config, falling back to defaults when it is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Config load error, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Frame cap to apply, none while vsync paces the frames
    pub fn effective_fps_limit(&self) -> Option<u32> {
        if self.vsync || self.fps_limit == 0 {
            None
        } else {
            Some(self.fps_limit)
        }
    }

    /// Bind `action` to `key`
    pub fn rebind(&mut self, action: KeyAction, key: KeyCode) {
        self.key_bindings.rebind(action, key);
    }

    /// Toggle vertical sync
    pub fn toggle_vsync(&mut self) {
        self.vsync = !self.vsync;
    }

    /// Step to the next allowed frame cap; ignored while vsync is on
    pub fn cycle_fps_limit(&mut self) {
        if self.vsync {
            return;
        }
        self.fps_limit = match ALLOWED_FPS.iter().position(|&fps| fps == self.fps_limit) {
            Some(i) => ALLOWED_FPS[(i + 1) % ALLOWED_FPS.len()],
            None => ALLOWED_FPS
                .iter()
                .copied()
                .find(|&fps| fps > self.fps_limit)
                .unwrap_or(ALLOWED_FPS[0]),
        };
    }

    /// Toggle between fullscreen and windowed
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    /// Raise the volume by 0.1, wrapping to silence from 0.9 and up
    pub fn cycle_music_volume(&mut self) {
        self.music_volume = if self.music_volume >= 0.9 {
            0.0
        } else {
            ((self.music_volume + 0.1) * 10.0).round() / 10.0
        };
    }
}
