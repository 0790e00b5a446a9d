// Skill catalog and equip slots

use std::collections::HashMap;

use log::debug;
use winit::keyboard::KeyCode;

use super::skill::{Skill, SkillKind};
use super::{SkillError, SkillTarget};

pub const SLOT_COUNT: usize = 4;

/// Owns every known skill and the four key-bound equip slots
///
/// A skill occupies at most one slot at a time.
#[derive(Debug, Clone)]
pub struct SkillManager {
    catalog: HashMap<String, Skill>,
    slots: [Option<String>; SLOT_COUNT],
    key_bindings: [KeyCode; SLOT_COUNT],
}

impl Default for SkillManager {
    fn default() -> Self {
        Self::new([KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4])
    }
}

impl SkillManager {
    /// Create an empty catalog with four empty slots
    pub fn new(key_bindings: [KeyCode; SLOT_COUNT]) -> Self {
        Self {
            catalog: HashMap::new(),
            slots: Default::default(),
            key_bindings,
        }
    }

    /// The built-in skills, each equipped in its default slot
    pub fn with_default_skills(key_bindings: [KeyCode; SLOT_COUNT]) -> Self {
        let mut manager = Self::new(key_bindings);
        for (slot, kind) in SkillKind::ALL.into_iter().enumerate() {
            manager.add_skill(Skill::new(kind));
            // Freshly added names in range cannot fail
            let _ = manager.equip(kind.name(), slot);
        }
        manager
    }

    /// Add a skill to the catalog, replacing any skill with the same name
    pub fn add_skill(&mut self, skill: Skill) {
        self.catalog.insert(skill.name().to_string(), skill);
    }

    /// Look up a skill by name
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.catalog.get(name)
    }

    pub fn skill_count(&self) -> usize {
        self.catalog.len()
    }

    /// Put `name` into `slot`, vacating any other slot that holds it
    pub fn equip(&mut self, name: &str, slot: usize) -> Result<(), SkillError> {
        if slot >= SLOT_COUNT {
            return Err(SkillError::InvalidSlot(slot));
        }
        if !self.catalog.contains_key(name) {
            return Err(SkillError::UnknownSkill(name.to_string()));
        }

        for held in self.slots.iter_mut() {
            if held.as_deref() == Some(name) {
                *held = None;
            }
        }
        if let Some(displaced) = self.slots[slot].take() {
            if let Some(skill) = self.catalog.get_mut(&displaced) {
                skill.set_equipped(None);
            }
        }

        let key = self.key_bindings[slot];
        if let Some(skill) = self.catalog.get_mut(name) {
            skill.set_equipped(Some(key));
        }
        self.slots[slot] = Some(name.to_string());
        debug!("Equipped {} in slot {} ({:?})", name, slot, key);
        Ok(())
    }

    /// Empty `slot`; out-of-range or empty slots are ignored
    pub fn unequip(&mut self, slot: usize) {
        let Some(held) = self.slots.get_mut(slot) else {
            return;
        };
        if let Some(name) = held.take() {
            if let Some(skill) = self.catalog.get_mut(&name) {
                skill.set_equipped(None);
            }
        }
    }

    /// The skill equipped in `slot`
    pub fn slot(&self, slot: usize) -> Option<&Skill> {
        let name = self.slots.get(slot)?.as_deref()?;
        self.catalog.get(name)
    }

    /// Slot index whose key is `key`
    pub fn slot_for_key(&self, key: KeyCode) -> Option<usize> {
        self.key_bindings.iter().position(|&bound| bound == key)
    }

    /// Get the key bound to `slot`
    pub fn key_for_slot(&self, slot: usize) -> Option<KeyCode> {
        self.key_bindings.get(slot).copied()
    }

    /// Replace the slot keys and retag equipped skills
    pub fn set_key_bindings(&mut self, key_bindings: [KeyCode; SLOT_COUNT]) {
        self.key_bindings = key_bindings;
        for (slot, held) in self.slots.iter().enumerate() {
            if let Some(skill) = held.as_ref().and_then(|name| self.catalog.get_mut(name)) {
                skill.set_equipped(Some(key_bindings[slot]));
            }
        }
    }

    /// Tick every skill's cooldown, equipped or not
    pub fn update(&mut self, dt: f32) {
        for skill in self.catalog.values_mut() {
            skill.update(dt);
        }
    }

    /// Cast the skill whose slot key is `key`
    pub fn use_by_key<T: SkillTarget + ?Sized>(
        &mut self,
        key: KeyCode,
        now_ms: u64,
        target: &mut T,
    ) -> Result<SkillKind, SkillError> {
        let slot = self.slot_for_key(key).ok_or(SkillError::NotBound(key))?;
        if self.slots[slot].is_none() {
            return Err(SkillError::NotBound(key));
        }
        self.use_slot(slot, now_ms, target)
    }

    /// Cast the skill equipped in `slot`
    pub fn use_slot<T: SkillTarget + ?Sized>(
        &mut self,
        slot: usize,
        now_ms: u64,
        target: &mut T,
    ) -> Result<SkillKind, SkillError> {
        let name = self
            .slots
            .get(slot)
            .ok_or(SkillError::InvalidSlot(slot))?
            .as_deref()
            .ok_or(SkillError::EmptySlot(slot))?;
        let skill = self
            .catalog
            .get_mut(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;
        skill.activate(now_ms, target)?;
        Ok(skill.kind())
    }
}
