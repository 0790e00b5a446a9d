// Player character: movement intent, combat, resources and skills

use glam::Vec2;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use winit::keyboard::KeyCode;

use super::animation::Frame;
use super::state::{PlayerState, PlayerStateMachine};
use super::stats::PlayerStats;
use crate::core::Rect;
use crate::engine::physics::{resolve, CollisionReport, KinematicBody, SolidGeometry};
use crate::game::save::SaveState;
use crate::game::skills::{SkillError, SkillKind, SkillManager, SkillTarget, SLOT_COUNT};

/// Something the player did that the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    SkillCast {
        kind: SkillKind,
        origin: Vec2,
        facing_left: bool,
    },
    Died,
}

/// Health and mana pools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    pub mana: u32,
    pub max_mana: u32,
}

impl Vitals {
    /// Add mana, capped at the maximum
    pub fn add_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
    }

    /// Spend mana if enough is available
    pub fn use_mana(&mut self, amount: u32) -> bool {
        if self.mana < amount {
            return false;
        }
        self.mana -= amount;
        true
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

/// What a skill sees of the player while it is being cast
struct SkillContext<'a> {
    vitals: &'a mut Vitals,
    events: &'a mut Vec<PlayerEvent>,
    origin: Vec2,
    facing_left: bool,
}

impl SkillTarget for SkillContext<'_> {
    fn mana(&self) -> u32 {
        self.vitals.mana
    }

    fn spend_mana(&mut self, amount: u32) -> bool {
        self.vitals.use_mana(amount)
    }

    fn restore_health(&mut self, amount: i32) {
        self.vitals.heal(amount);
    }

    fn announce(&mut self, kind: SkillKind) {
        self.events.push(PlayerEvent::SkillCast {
            kind,
            origin: self.origin,
            facing_left: self.facing_left,
        });
    }
}

/// Reduce the two held-key flags to a direction in {-1, 0, 1}
pub fn recompute_velocity(left_held: bool, right_held: bool) -> i32 {
    match (left_held, right_held) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

#[derive(Debug)]
pub struct Player {
    stats: PlayerStats,
    body: KinematicBody,
    /// Direction from the held keys, always -1, 0 or 1
    velocity_x: i32,
    vitals: Vitals,
    coins: u32,

    facing_left: bool,
    left_held: bool,
    right_held: bool,
    sprinting: bool,
    /// Time of the secondary click that may start a double click
    last_secondary_click: Option<u64>,

    machine: PlayerStateMachine,
    skills: SkillManager,
    frame: Frame,
    events: Vec<PlayerEvent>,
    rng: SmallRng,
}

impl Player {
    /// Create a player whose hitbox is centred on `center`
    pub fn new(center: Vec2, health: i32, machine: PlayerStateMachine, skill_keys: [KeyCode; SLOT_COUNT]) -> Self {
        Self::with_stats(PlayerStats::default(), center, health, machine, skill_keys)
    }

    /// Create a player with custom stats
    pub fn with_stats(
        stats: PlayerStats,
        center: Vec2,
        health: i32,
        machine: PlayerStateMachine,
        skill_keys: [KeyCode; SLOT_COUNT],
    ) -> Self {
        let body = KinematicBody::centered_at(center, stats.width, stats.height);
        let vitals = Vitals {
            health: health.min(stats.max_health),
            max_health: stats.max_health,
            mana: stats.max_mana,
            max_mana: stats.max_mana,
        };
        let frame = machine.current_frame(false);
        Self {
            stats,
            body,
            velocity_x: 0,
            vitals,
            coins: 0,
            facing_left: false,
            left_held: false,
            right_held: false,
            sprinting: false,
            last_secondary_click: None,
            machine,
            skills: SkillManager::with_default_skills(skill_keys),
            frame,
            events: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Restore a player from a save, with health kept in `1..=max_health`
    pub fn from_save(save: SaveState, machine: PlayerStateMachine, skill_keys: [KeyCode; SLOT_COUNT]) -> Self {
        let health = save.health.max(1);
        Self::new(Vec2::new(save.x as f32, save.y as f32), health, machine, skill_keys)
    }

    /// Use a fixed seed for the light-attack choice
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    // Movement

    /// Hold or release the left movement key
    pub fn set_move_left(&mut self, held: bool) {
        self.left_held = held;
        self.velocity_x = recompute_velocity(self.left_held, self.right_held);
    }

    /// Hold or release the right movement key
    pub fn set_move_right(&mut self, held: bool) {
        self.right_held = held;
        self.velocity_x = recompute_velocity(self.left_held, self.right_held);
    }

    /// Jump if standing on the ground and free to act
    pub fn jump(&mut self) {
        if self.body.on_ground && self.state().can_jump() {
            self.body.velocity_y = self.stats.jump_speed;
            self.body.on_ground = false;
        }
    }

    /// Switch between walking and running
    pub fn toggle_sprint(&mut self) {
        self.sprinting = !self.sprinting;
    }

    /// Raise the shield
    pub fn start_block(&mut self) {
        if self.state().is_unoccupied() {
            self.machine.force_transition(PlayerState::Block);
        }
    }

    /// Lower the shield
    pub fn stop_block(&mut self) {
        if self.state() == PlayerState::Block {
            self.machine.force_transition(PlayerState::Idle);
        }
    }

    // Combat

    /// Light attack, one of two at random
    pub fn primary_attack(&mut self) {
        if !self.state().is_unoccupied() {
            return;
        }
        let attack = if self.rng.gen_bool(0.5) {
            PlayerState::Attack1
        } else {
            PlayerState::Attack2
        };
        self.machine.force_transition(attack);
    }

    /// Heavy attack on the second of two clicks within the double-click window
    pub fn secondary_attack(&mut self, now_ms: u64) {
        if !self.state().is_unoccupied() {
            return;
        }
        match self.last_secondary_click {
            Some(last) if now_ms.saturating_sub(last) <= self.stats.double_click_ms => {
                self.machine.force_transition(PlayerState::Heavy);
                self.last_secondary_click = None;
            }
            _ => self.last_secondary_click = Some(now_ms),
        }
    }

    /// Apply damage, halved (at least 1) while blocking
    pub fn take_damage(&mut self, amount: i32) {
        if self.is_removed() || self.state() == PlayerState::Death {
            return;
        }
        let amount = if self.state() == PlayerState::Block {
            (amount / 2).max(1)
        } else {
            amount
        };
        self.vitals.health = (self.vitals.health - amount).max(0);

        if self.vitals.health <= 0 {
            info!("Player died");
            self.machine.force_transition(PlayerState::Death);
            self.events.push(PlayerEvent::Died);
        } else {
            self.machine.force_transition(PlayerState::Hurt);
        }
    }

    /// Cast the skill bound to `key`, returning whether it fired
    pub fn use_skill(&mut self, key: KeyCode, now_ms: u64) -> bool {
        self.cast(|skills, context| skills.use_by_key(key, now_ms, context))
    }

    /// Cast the skill equipped in `slot`, returning whether it fired
    pub fn use_skill_slot(&mut self, slot: usize, now_ms: u64) -> bool {
        self.cast(|skills, context| skills.use_slot(slot, now_ms, context))
    }

    fn cast(
        &mut self,
        use_skill: impl FnOnce(&mut SkillManager, &mut SkillContext<'_>) -> Result<SkillKind, SkillError>,
    ) -> bool {
        if !self.state().is_unoccupied() {
            return false;
        }
        let mut context = SkillContext {
            vitals: &mut self.vitals,
            events: &mut self.events,
            origin: self.body.center(),
            facing_left: self.facing_left,
        };
        match use_skill(&mut self.skills, &mut context) {
            Ok(kind) => {
                debug!("Player used {}", kind.name());
                true
            }
            Err(e) => {
                debug!("Skill not used: {}", e);
                false
            }
        }
    }

    // Per-tick

    /// State rules, facing, animation and cooldowns
    pub fn update(&mut self, dt: f32) {
        if self.is_removed() {
            return;
        }
        self.machine.update(self.velocity_x != 0, self.sprinting);

        if self.velocity_x < 0 {
            self.facing_left = true;
        } else if self.velocity_x > 0 {
            self.facing_left = false;
        }

        self.frame = self.machine.animate(dt, self.facing_left);
        self.skills.update(dt);
    }

    /// Move through the level for one tick
    pub fn step_physics(&mut self, geometry: &dyn SolidGeometry) -> CollisionReport {
        if self.is_removed() {
            return CollisionReport::default();
        }
        let dx = self.velocity_x as f32 * self.current_speed();
        let report = resolve(&mut self.body, dx, &self.stats.motion(), geometry);
        self.velocity_x = recompute_velocity(self.left_held, self.right_held);
        report
    }

    // Resources

    /// Add coins
    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Spend coins if enough are held
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Add mana, capped at the maximum
    pub fn add_mana(&mut self, amount: u32) {
        self.vitals.add_mana(amount);
    }

    /// Spend mana if enough is available
    pub fn use_mana(&mut self, amount: u32) -> bool {
        self.vitals.use_mana(amount)
    }

    // Accessors

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.machine.state()
    }

    /// Check if the death animation has finished
    pub fn is_removed(&self) -> bool {
        self.machine.is_removed()
    }

    /// Get the collision box
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Get the center of the collision box
    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Get the horizontal velocity in pixels per frame
    pub fn velocity_x(&self) -> i32 {
        self.velocity_x
    }

    /// Get the vertical velocity in pixels per frame
    pub fn velocity_y(&self) -> f32 {
        self.body.velocity_y
    }

    /// Check if standing on solid ground
    pub fn on_ground(&self) -> bool {
        self.body.on_ground
    }

    pub fn is_facing_left(&self) -> bool {
        self.facing_left
    }

    /// Check if running
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Get the walk or run speed in use
    pub fn current_speed(&self) -> f32 {
        self.stats.speed(self.sprinting)
    }

    /// Get current health
    pub fn health(&self) -> i32 {
        self.vitals.health
    }

    /// Get maximum health
    pub fn max_health(&self) -> i32 {
        self.vitals.max_health
    }

    /// Get current mana
    pub fn mana(&self) -> u32 {
        self.vitals.mana
    }

    /// Get maximum mana
    pub fn max_mana(&self) -> u32 {
        self.vitals.max_mana
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Get the animation frame to draw
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Get the skill slots
    pub fn skills(&self) -> &SkillManager {
        &self.skills
    }

    /// Get the skill slots mutably
    pub fn skills_mut(&mut self) -> &mut SkillManager {
        &mut self.skills
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot position and health for saving
    pub fn save_state(&self) -> SaveState {
        let (x, y) = self.rect().center();
        SaveState {
            x,
            y,
            health: self.vitals.health,
        }
    }
}
