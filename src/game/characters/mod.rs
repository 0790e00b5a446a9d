// Player character
//
// This module contains everything related to the playable knight:
// - Tuning constants
// - Frame animation clips
// - The state machine that picks the active clip
// - The player entity itself

pub mod animation;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationError, Frame};
pub use player::{recompute_velocity, Player, PlayerEvent, Vitals};
pub use state::{PlayerState, PlayerStateMachine};
pub use stats::{PlayerStats, BASE_STATS};
