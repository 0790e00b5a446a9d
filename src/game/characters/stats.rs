// Player tuning constants
//
// Movement values are per tick, not per second: the simulation advances one
// step per rendered frame.

use crate::engine::physics::MotionParams;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    // Movement
    /// Horizontal pixels per tick while walking
    pub base_speed: f32,
    /// Speed multiplier while sprint is toggled on
    pub sprint_multiplier: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_speed: f32,

    // Physics
    pub gravity: f32,
    pub max_fall_speed: f32,

    // Resources
    pub max_health: i32,
    pub max_mana: u32,

    // Combat
    /// Two secondary clicks closer than this trigger a heavy attack
    pub double_click_ms: u64,

    // Hitbox
    pub width: i32,
    pub height: i32,
}

pub const BASE_STATS: PlayerStats = PlayerStats {
    base_speed: 5.0,
    sprint_multiplier: 2.0,
    jump_speed: -18.0,

    gravity: 1.0,
    max_fall_speed: 20.0,

    max_health: 100,
    max_mana: 100,

    double_click_ms: 300,

    width: 64,
    height: 64,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Get the motion parameters for physics
    pub fn motion(&self) -> MotionParams {
        MotionParams {
            gravity: self.gravity,
            max_fall_speed: self.max_fall_speed,
        }
    }

    /// Get the horizontal speed, walking or running
    pub fn speed(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.base_speed * self.sprint_multiplier
        } else {
            self.base_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.max_health, 100);
        assert_eq!(stats.max_mana, 100);
        assert_eq!(stats.double_click_ms, 300);
        assert!(stats.jump_speed < 0.0, "jumping moves up the screen");
    }

    #[test]
    fn test_sprint_speed() {
        let stats = PlayerStats::default();
        assert_eq!(stats.speed(false), 5.0);
        assert_eq!(stats.speed(true), 10.0);
    }

    #[test]
    fn test_motion_params() {
        let motion = PlayerStats::default().motion();
        assert_eq!(motion.gravity, 1.0);
        assert_eq!(motion.max_fall_speed, 20.0);
    }
}
