// Skill definitions and cooldown bookkeeping

use log::debug;
use winit::keyboard::KeyCode;

use super::{SkillError, SkillTarget};
use crate::engine::assets::AssetId;

/// Health restored by Heal
pub const HEAL_AMOUNT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    Attack,
    Defense,
    Utility,
    Special,
}

impl SkillCategory {
    /// Icon colour used when the skill's icon image is missing
    pub fn placeholder_color(self) -> [u8; 3] {
        match self {
            Self::Attack => [200, 50, 50],
            Self::Defense => [50, 100, 200],
            Self::Utility => [50, 180, 50],
            Self::Special => [180, 50, 180],
        }
    }
}

/// The built-in skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    Fireball,
    Shield,
    Heal,
    Blink,
}

impl SkillKind {
    pub const ALL: [SkillKind; 4] = [Self::Fireball, Self::Shield, Self::Heal, Self::Blink];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Fireball => "Fireball",
            Self::Shield => "Shield",
            Self::Heal => "Heal",
            Self::Blink => "Blink",
        }
    }

    /// (cooldown seconds, mana cost, category)
    fn tuning(self) -> (f32, u32, SkillCategory) {
        match self {
            Self::Fireball => (5.0, 25, SkillCategory::Attack),
            Self::Shield => (10.0, 30, SkillCategory::Defense),
            Self::Heal => (15.0, 40, SkillCategory::Utility),
            Self::Blink => (7.0, 20, SkillCategory::Special),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Skill {
    kind: SkillKind,
    name: String,
    icon: AssetId,
    cooldown: f32,
    mana_cost: u32,
    category: SkillCategory,
    /// Activation key, set when equipped
    key: Option<KeyCode>,
    remaining_cooldown: f32,
    last_used_ms: Option<u64>,
    equipped: bool,
}

impl Skill {
    /// Create a skill with its built-in tuning
    pub fn new(kind: SkillKind) -> Self {
        let (cooldown, mana_cost, category) = kind.tuning();
        Self::with_tuning(kind, cooldown, mana_cost, category)
    }

    /// Create a skill with custom tuning
    pub fn with_tuning(kind: SkillKind, cooldown: f32, mana_cost: u32, category: SkillCategory) -> Self {
        let name = kind.name().to_string();
        let icon = AssetId::from_path(&format!("hud/skill_{}.png", name.to_lowercase()));
        Self {
            kind,
            name,
            icon,
            cooldown: cooldown.max(0.0),
            mana_cost,
            category,
            key: None,
            remaining_cooldown: 0.0,
            last_used_ms: None,
            equipped: false,
        }
    }

    /// Get the skill kind
    pub fn kind(&self) -> SkillKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the HUD icon asset
    pub fn icon(&self) -> AssetId {
        self.icon
    }

    /// Get the cooldown in seconds
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Get the mana cost
    pub fn mana_cost(&self) -> u32 {
        self.mana_cost
    }

    pub fn category(&self) -> SkillCategory {
        self.category
    }

    /// Get the key the skill is equipped on
    pub fn key(&self) -> Option<KeyCode> {
        self.key
    }

    /// Get the remaining cooldown in seconds
    pub fn remaining_cooldown(&self) -> f32 {
        self.remaining_cooldown
    }

    /// Get the timestamp of the last cast
    pub fn last_used_ms(&self) -> Option<u64> {
        self.last_used_ms
    }

    /// Check if the skill sits in a slot
    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    /// Check if the cooldown has run out
    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown <= 0.0
    }

    /// Remaining share of the cooldown, 1.0 just after use and 0.0 when ready
    pub fn cooldown_fraction(&self) -> f32 {
        if self.cooldown <= 0.0 {
            return 0.0;
        }
        self.remaining_cooldown / self.cooldown
    }

    pub(crate) fn set_equipped(&mut self, key: Option<KeyCode>) {
        self.equipped = key.is_some();
        self.key = key;
    }

    /// Count the cooldown down by `dt` seconds, stopping at zero
    pub fn update(&mut self, dt: f32) {
        if self.remaining_cooldown > 0.0 {
            self.remaining_cooldown = (self.remaining_cooldown - dt).max(0.0);
        }
    }

    /// Cast the skill on `target`
    ///
    /// Fails without side effects while cooling down or when the target
    /// cannot pay the mana cost.
    pub fn activate<T: SkillTarget + ?Sized>(&mut self, now_ms: u64, target: &mut T) -> Result<(), SkillError> {
        if self.remaining_cooldown > 0.0 {
            return Err(SkillError::OnCooldown {
                name: self.name.clone(),
                remaining: self.remaining_cooldown,
            });
        }
        let available = target.mana();
        if !target.spend_mana(self.mana_cost) {
            return Err(SkillError::InsufficientMana {
                name: self.name.clone(),
                cost: self.mana_cost,
                available,
            });
        }

        self.apply_effect(target);
        self.remaining_cooldown = self.cooldown;
        self.last_used_ms = Some(now_ms);
        debug!("{} cast at {}ms", self.name, now_ms);
        Ok(())
    }

    fn apply_effect<T: SkillTarget + ?Sized>(&self, target: &mut T) {
        match self.kind {
            SkillKind::Heal => target.restore_health(HEAL_AMOUNT),
            kind => target.announce(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::skills::test_support::Dummy;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_tuning() {
        let fireball = Skill::new(SkillKind::Fireball);
        assert_eq!(fireball.cooldown(), 5.0);
        assert_eq!(fireball.mana_cost(), 25);
        assert_eq!(fireball.category(), SkillCategory::Attack);

        let blink = Skill::new(SkillKind::Blink);
        assert_eq!(blink.cooldown(), 7.0);
        assert_eq!(blink.mana_cost(), 20);
        assert_eq!(blink.category(), SkillCategory::Special);
    }

    #[test]
    fn test_icon_path() {
        let heal = Skill::new(SkillKind::Heal);
        assert_eq!(heal.icon(), AssetId::from_path("hud/skill_heal.png"));
    }

    #[test]
    fn test_heal_scenario() {
        let mut heal = Skill::new(SkillKind::Heal);
        let mut target = Dummy::new(50, 100);

        assert!(heal.activate(1000, &mut target).is_ok());
        assert_eq!(target.health, 70);
        assert_eq!(target.mana, 60);
        assert_eq!(heal.remaining_cooldown(), 15.0);
        assert_eq!(heal.last_used_ms(), Some(1000));

        let err = heal.activate(1001, &mut target).unwrap_err();
        assert!(matches!(err, SkillError::OnCooldown { .. }));
        assert_eq!(target.health, 70);
        assert_eq!(target.mana, 60);
        assert_eq!(heal.remaining_cooldown(), 15.0);
        assert_eq!(heal.last_used_ms(), Some(1000));
    }

    #[test]
    fn test_heal_caps_health() {
        let mut heal = Skill::new(SkillKind::Heal);
        let mut target = Dummy::new(95, 100);
        heal.activate(0, &mut target).unwrap();
        assert_eq!(target.health, 100);
    }

    #[test]
    fn test_insufficient_mana_is_atomic() {
        let mut shield = Skill::new(SkillKind::Shield);
        let mut target = Dummy::new(100, 29);
        let err = shield.activate(0, &mut target).unwrap_err();
        assert_eq!(
            err,
            SkillError::InsufficientMana {
                name: "Shield".to_string(),
                cost: 30,
                available: 29
            }
        );
        assert_eq!(target.mana, 29);
        assert!(target.announced.is_empty());
        assert!(shield.is_ready());
        assert_eq!(shield.last_used_ms(), None);
    }

    /// Reports mana it then refuses to spend
    struct Reserved(Dummy);

    impl SkillTarget for Reserved {
        fn mana(&self) -> u32 {
            self.0.mana
        }

        fn spend_mana(&mut self, _amount: u32) -> bool {
            false
        }

        fn restore_health(&mut self, amount: i32) {
            self.0.restore_health(amount);
        }

        fn announce(&mut self, kind: SkillKind) {
            self.0.announce(kind);
        }
    }

    #[test]
    fn test_refused_payment_casts_nothing() {
        let mut heal = Skill::new(SkillKind::Heal);
        let mut target = Reserved(Dummy::new(50, 100));
        let err = heal.activate(0, &mut target).unwrap_err();
        assert!(matches!(err, SkillError::InsufficientMana { cost: 40, available: 100, .. }));
        assert_eq!(target.0.health, 50);
        assert!(heal.is_ready());
        assert_eq!(heal.last_used_ms(), None);

        let mut fireball = Skill::new(SkillKind::Fireball);
        assert!(fireball.activate(0, &mut target).is_err());
        assert!(target.0.announced.is_empty());
        assert_eq!(fireball.remaining_cooldown(), 0.0);
    }

    #[test]
    fn test_non_heal_skills_announce() {
        let mut fireball = Skill::new(SkillKind::Fireball);
        let mut target = Dummy::new(40, 100);
        fireball.activate(0, &mut target).unwrap();
        assert_eq!(target.announced, vec![SkillKind::Fireball]);
        assert_eq!(target.health, 40);
        assert_eq!(target.mana, 75);
    }

    #[test]
    fn test_cooldown_reaches_exactly_zero() {
        let mut blink = Skill::new(SkillKind::Blink);
        let mut target = Dummy::new(100, 100);
        blink.activate(0, &mut target).unwrap();

        blink.update(3.0);
        assert_relative_eq!(blink.remaining_cooldown(), 4.0);
        assert_relative_eq!(blink.cooldown_fraction(), 4.0 / 7.0);

        blink.update(10.0);
        assert_eq!(blink.remaining_cooldown(), 0.0);
        blink.update(1.0);
        assert_eq!(blink.remaining_cooldown(), 0.0);
        assert!(blink.activate(8000, &mut target).is_ok());
    }

    #[test]
    fn test_zero_cooldown_fraction() {
        let skill = Skill::with_tuning(SkillKind::Blink, 0.0, 0, SkillCategory::Special);
        assert_eq!(skill.cooldown_fraction(), 0.0);
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(SkillCategory::Attack.placeholder_color(), [200, 50, 50]);
        assert_eq!(SkillCategory::Special.placeholder_color(), [180, 50, 180]);
    }
}
