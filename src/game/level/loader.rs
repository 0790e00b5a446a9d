// Level file parsing

use glam::Vec2;
use log::{info, warn};
use serde::Deserialize;

use super::grid::TileGrid;
use super::{LevelError, MAX_LEVEL_CELLS};
use crate::engine::assets::{AssetKind, AssetLoader};

fn default_collidable_gids() -> Vec<u32> {
    vec![1, 2]
}

fn default_visible() -> bool {
    true
}

/// On-disk level layout: `assets/levels/<id>.json`
#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
    pub tile_size: i32,
    /// Size in cells
    pub width: usize,
    pub height: usize,
    pub layers: Vec<LayerData>,
    #[serde(default = "default_collidable_gids")]
    pub collidable_gids: Vec<u32>,
    /// Player spawn centre in pixels
    #[serde(default)]
    pub spawn: Option<[f32; 2]>,
}

/// One tile layer, row-major gids with 0 meaning empty
#[derive(Debug, Clone, Deserialize)]
pub struct LayerData {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub data: Vec<u32>,
}

impl LevelFile {
    /// Parse a level from JSON
    pub fn parse(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Cells in one layer, rejecting grids whose size or pixel extent is out of range
    fn cell_count(&self) -> Result<usize, LevelError> {
        let too_large = || LevelError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let cells = self
            .width
            .checked_mul(self.height)
            .filter(|&cells| cells <= MAX_LEVEL_CELLS)
            .ok_or_else(too_large)?;
        let extent_fits = |cells: usize| {
            i32::try_from(cells)
                .ok()
                .and_then(|n| n.checked_mul(self.tile_size))
                .is_some()
        };
        if !extent_fits(self.width) || !extent_fits(self.height) {
            return Err(too_large());
        }
        Ok(cells)
    }

    /// Turn the visible layers into a grid
    pub fn build(&self) -> Result<TileGrid, LevelError> {
        if self.tile_size <= 0 {
            return Err(LevelError::InvalidTileSize(self.tile_size));
        }
        let expected = self.cell_count()?;
        let mut grid = TileGrid::new(self.tile_size, self.width, self.height);

        for layer in &self.layers {
            if layer.data.len() != expected {
                return Err(LevelError::LayerSize {
                    layer: layer.name.clone(),
                    expected,
                    actual: layer.data.len(),
                });
            }
            if !layer.visible {
                continue;
            }
            for (i, &gid) in layer.data.iter().enumerate() {
                let collidable = self.collidable_gids.contains(&gid);
                grid.place(i % self.width, i / self.width, gid, collidable);
            }
        }

        grid.set_spawn(self.spawn.map(|[x, y]| Vec2::new(x, y)));
        Ok(grid)
    }
}

impl TileGrid {
    /// Load `levels/<level_id>.json`
    pub fn load(loader: &AssetLoader, level_id: &str) -> Result<Self, LevelError> {
        let json = loader.read_to_string(AssetKind::Level, &format!("{}.json", level_id))?;
        let grid = LevelFile::parse(&json)?.build()?;
        info!(
            "Loaded level '{}': {} tiles, {} collidable",
            level_id,
            grid.tile_count(),
            grid.collidable_count()
        );
        Ok(grid)
    }

    /// Load a level, degrading to an empty grid when it cannot be read
    pub fn load_or_empty(loader: &AssetLoader, level_id: &str) -> Self {
        match Self::load(loader, level_id) {
            Ok(grid) => grid,
            Err(e) => {
                warn!("Level '{}' unavailable, continuing without collision: {}", level_id, e);
                Self::empty()
            }
        }
    }
}
