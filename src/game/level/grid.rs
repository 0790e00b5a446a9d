// Static tile geometry

use glam::Vec2;

use crate::core::Rect;
use crate::engine::physics::SolidGeometry;

/// A single placed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub rect: Rect,
    /// Tileset id, never 0
    pub gid: u32,
    pub collidable: bool,
}

/// All tiles of a level plus a cell lookup for the solid ones
///
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    tile_size: i32,
    /// Size in cells
    width: usize,
    height: usize,
    /// Every tile, in layer then row-major order
    tiles: Vec<Tile>,
    /// Row-major, true where any layer has a collidable tile
    solid: Vec<bool>,
    spawn: Option<Vec2>,
}

impl TileGrid {
    /// A grid with no tiles at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an empty grid
    pub fn new(tile_size: i32, width: usize, height: usize) -> Self {
        Self {
            tile_size,
            width,
            height,
            tiles: Vec::new(),
            solid: vec![false; width * height],
            spawn: None,
        }
    }

    /// Build a grid from text rows
    ///
    /// `#` is a solid tile, `=` a decorative one and anything else is empty.
    pub fn from_ascii(rows: &[&str], tile_size: i32) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(tile_size, width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                match c {
                    '#' => grid.place(x, y, 1, true),
                    '=' => grid.place(x, y, 3, false),
                    _ => {}
                }
            }
        }
        grid
    }

    /// Add a tile at cell `(x, y)`; out-of-range cells and gid 0 are ignored
    pub fn place(&mut self, x: usize, y: usize, gid: u32, collidable: bool) {
        if gid == 0 || x >= self.width || y >= self.height {
            return;
        }
        let (Some(left), Some(top)) = (self.cell_origin(x), self.cell_origin(y)) else {
            return;
        };
        let rect = Rect::new(left, top, self.tile_size, self.tile_size);
        self.tiles.push(Tile {
            rect,
            gid,
            collidable,
        });
        if collidable {
            self.solid[y * self.width + x] = true;
        }
    }

    /// Set the spawn point
    pub fn set_spawn(&mut self, spawn: Option<Vec2>) {
        self.spawn = spawn;
    }

    /// Player spawn point in pixels, if the level defines one
    pub fn spawn(&self) -> Option<Vec2> {
        self.spawn
    }

    /// Get the tile size in pixels
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Get the width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the width in pixels
    pub fn width_px(&self) -> i32 {
        self.cell_origin(self.width).unwrap_or(i32::MAX)
    }

    /// Get the height in pixels
    pub fn height_px(&self) -> i32 {
        self.cell_origin(self.height).unwrap_or(i32::MAX)
    }

    /// Check if the grid has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get the number of tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Get the number of solid tiles
    pub fn collidable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.collidable).count()
    }

    /// Check if the cell at `(x, y)` holds a solid tile
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return false;
        }
        self.solid[y as usize * self.width + x as usize]
    }

    /// Tiles to draw for a world-space view
    pub fn visible_tiles(&self, view: Rect) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(move |tile| tile.rect.intersects(&view))
    }

    /// Pixel coordinate of a cell edge, none when it leaves the i32 range
    fn cell_origin(&self, cell: usize) -> Option<i32> {
        i32::try_from(cell).ok()?.checked_mul(self.tile_size)
    }

    fn cell_rect(&self, x: i32, y: i32) -> Rect {
        Rect::new(
            x.saturating_mul(self.tile_size),
            y.saturating_mul(self.tile_size),
            self.tile_size,
            self.tile_size,
        )
    }
}

impl SolidGeometry for TileGrid {
    fn solids_overlapping(&self, area: Rect) -> Vec<Rect> {
        if self.tile_size <= 0 || area.w <= 0 || area.h <= 0 {
            return Vec::new();
        }
        let ts = self.tile_size;
        let x0 = area.left().div_euclid(ts).max(0);
        let y0 = area.top().div_euclid(ts).max(0);
        let x1 = (area.right() - 1).div_euclid(ts).min(self.width as i32 - 1);
        let y1 = (area.bottom() - 1).div_euclid(ts).min(self.height as i32 - 1);

        let mut hits = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.is_solid(x, y) {
                    hits.push(self.cell_rect(x, y));
                }
            }
        }
        hits
    }

    fn horizontal_bounds(&self) -> Option<(i32, i32)> {
        if self.is_empty() {
            None
        } else {
            Some((0, self.width_px()))
        }
    }
}
