// Level geometry
//
// Levels are tile grids loaded once per gameplay session. Only collidable
// tiles take part in collision; the rest are drawn and nothing more.

pub mod grid;
pub mod loader;

pub use grid::{Tile, TileGrid};
pub use loader::LevelFile;

use crate::engine::assets::AssetError;

/// Level used when starting a new game
pub const FIRST_LEVEL: &str = "level_0";

/// Largest grid a level file may declare, in cells
pub const MAX_LEVEL_CELLS: usize = 1 << 22;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("Level asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Level parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layer '{layer}' has {actual} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid tile size: {0}")]
    InvalidTileSize(i32),

    #[error("Level of {width}x{height} tiles is too large")]
    TooLarge { width: usize, height: usize },
}
