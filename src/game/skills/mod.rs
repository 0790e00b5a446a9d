// Player skills
//
// Skills are catalog entries with a cooldown and a mana cost. Up to four of
// them are equipped into key-bound slots. Using a skill either succeeds
// completely or leaves everything untouched.

pub mod manager;
pub mod skill;

pub use manager::{SkillManager, SLOT_COUNT};
pub use skill::{Skill, SkillCategory, SkillKind};

use winit::keyboard::KeyCode;

/// Anything a skill can be cast by
pub trait SkillTarget {
    fn mana(&self) -> u32;

    /// Deduct mana, returning false without change when there is not enough
    fn spend_mana(&mut self, amount: u32) -> bool;

    fn restore_health(&mut self, amount: i32);

    /// Report a cast whose visuals and gameplay live outside the player
    fn announce(&mut self, kind: SkillKind);
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkillError {
    #[error("{name} is on cooldown for {remaining:.1}s")]
    OnCooldown { name: String, remaining: f32 },

    #[error("{name} needs {cost} mana, have {available}")]
    InsufficientMana {
        name: String,
        cost: u32,
        available: u32,
    },

    #[error("No skill bound to {0:?}")]
    NotBound(KeyCode),

    #[error("Slot {0} is empty")]
    EmptySlot(usize),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Invalid skill slot: {0}")]
    InvalidSlot(usize),
}
