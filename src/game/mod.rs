// Game layer: the knight, its skills, levels and the scenes around them

pub mod characters;
pub mod config;
pub mod hud;
pub mod level;
pub mod save;
pub mod scenes;
pub mod skills;
pub mod story;
