// Read-only view of the player for the HUD

use winit::keyboard::KeyCode;

use crate::core::Rect;
use crate::engine::assets::AssetId;
use crate::game::characters::{Frame, Player};
use crate::game::skills::{SkillCategory, SLOT_COUNT};

#[derive(Debug, Clone, PartialEq)]
pub struct SkillSlotView {
    pub name: String,
    pub icon: AssetId,
    pub category: SkillCategory,
    /// 1.0 right after use, 0.0 when ready
    pub cooldown_fraction: f32,
    pub mana_cost: u32,
    pub key: Option<KeyCode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub mana: u32,
    pub max_mana: u32,
    pub coins: u32,
    pub slots: [Option<SkillSlotView>; SLOT_COUNT],
    pub frame: Frame,
}

impl HudSnapshot {
    /// Capture the HUD values from the player
    pub fn capture(player: &Player) -> Self {
        let skills = player.skills();
        let slots = std::array::from_fn(|i| {
            skills.slot(i).map(|skill| SkillSlotView {
                name: skill.name().to_string(),
                icon: skill.icon(),
                category: skill.category(),
                cooldown_fraction: skill.cooldown_fraction(),
                mana_cost: skill.mana_cost(),
                key: skills.key_for_slot(i),
            })
        });
        Self {
            rect: player.rect(),
            health: player.health(),
            max_health: player.max_health(),
            mana: player.mana(),
            max_mana: player.max_mana(),
            coins: player.coins(),
            slots,
            frame: player.frame(),
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn mana_fraction(&self) -> f32 {
        if self.max_mana == 0 {
            return 0.0;
        }
        self.mana as f32 / self.max_mana as f32
    }
}
