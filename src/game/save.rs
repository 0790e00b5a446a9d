// Save game: player position and health
//
// Stored as three whitespace-separated integers: x y health, where x and y
// are the centre of the player's hitbox.

use std::path::Path;

use log::warn;

pub const SAVE_FILE: &str = "savegame.dat";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Save IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed save data: {0:?}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveState {
    pub x: i32,
    pub y: i32,
    pub health: i32,
}

impl Default for SaveState {
    /// Where a new game starts
    fn default() -> Self {
        Self {
            x: 100,
            y: 0,
            health: 100,
        }
    }
}

impl SaveState {
    /// Parse the `x y health` text form; health must be positive
    pub fn parse(text: &str) -> Result<Self, SaveError> {
        let malformed = || SaveError::Malformed(text.trim().to_string());
        let values = text
            .split_whitespace()
            .map(|part| part.parse::<i32>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            // A dead player is never saved
            &[x, y, health] if health > 0 => Ok(Self { x, y, health }),
            _ => Err(malformed()),
        }
    }

    /// Format as `x y health`
    pub fn to_text(&self) -> String {
        format!("{} {} {}", self.x, self.y, self.health)
    }

    /// Read a save, `Ok(None)` when there is none
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, SaveError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text).map(Some)
    }

    /// Read a save, treating unreadable data as no save
    pub fn load_or_none(path: impl AsRef<Path>) -> Option<Self> {
        match Self::load(path) {
            Ok(save) => save,
            Err(e) => {
                warn!("Ignoring save: {}", e);
                None
            }
        }
    }

    /// Write the save to `path`
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Check if a save file exists at `path`
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }
}
