// Key binding configuration and lookup tables

use super::action::{gameplay_bindings, menu_bindings, Action, InputContext, InputSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Rebindable movement/stance keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Left,
    Right,
    Jump,
    Sprint,
    Block,
}

impl KeyAction {
    pub const ALL: [KeyAction; 5] = [
        KeyAction::Left,
        KeyAction::Right,
        KeyAction::Jump,
        KeyAction::Sprint,
        KeyAction::Block,
    ];

    /// Name shown in the settings screen
    pub fn label(&self) -> &'static str {
        match self {
            KeyAction::Left => "Move Left",
            KeyAction::Right => "Move Right",
            KeyAction::Jump => "Jump",
            KeyAction::Sprint => "Sprint",
            KeyAction::Block => "Block",
        }
    }
}

/// User-configurable keyboard layout, persisted with the game config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub sprint: KeyCode,
    pub block: KeyCode,
    /// Activation keys of the four skill slots
    pub skills: [KeyCode; 4],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            sprint: KeyCode::ControlLeft,
            block: KeyCode::KeyF,
            skills: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
            ],
        }
    }
}

impl KeyBindings {
    /// Get the key bound to `action`
    pub fn get(&self, action: KeyAction) -> KeyCode {
        match action {
            KeyAction::Left => self.left,
            KeyAction::Right => self.right,
            KeyAction::Jump => self.jump,
            KeyAction::Sprint => self.sprint,
            KeyAction::Block => self.block,
        }
    }

    fn slot_mut(&mut self, action: KeyAction) -> &mut KeyCode {
        match action {
            KeyAction::Left => &mut self.left,
            KeyAction::Right => &mut self.right,
            KeyAction::Jump => &mut self.jump,
            KeyAction::Sprint => &mut self.sprint,
            KeyAction::Block => &mut self.block,
        }
    }

    /// Bind `key` to `action`. Any other action already using `key` takes over
    /// the old key of `action`, so the two swap and nothing is left duplicated.
    pub fn rebind(&mut self, action: KeyAction, key: KeyCode) {
        let previous = self.get(action);
        for other in KeyAction::ALL {
            if other != action && self.get(other) == key {
                *self.slot_mut(other) = previous;
            }
        }
        *self.slot_mut(action) = key;
    }
}

/// Input configuration for a single context
/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    context: InputContext,

    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty binding set
    pub fn new(context: InputContext) -> Self {
        Self {
            context,
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    /// Create a binding set from pairs
    pub fn from_bindings(context: InputContext, bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new(context);
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Get the context these bindings apply to
    pub fn context(&self) -> InputContext {
        self.context
    }

    /// Bind an input source to an action, replacing the source's old binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);
        self.bindings.insert(source, action);
        self.action_to_sources
            .entry(action)
            .or_default()
            .push(source);
    }

    /// Remove every binding for `source`
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to a source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an action has any binding
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }
}

/// Binding tables for every input context
#[derive(Debug, Clone)]
pub struct InputBindings {
    gameplay: InputConfig,
    menu: InputConfig,
}

impl InputBindings {
    /// Build the per-context bindings from the configured keys
    pub fn new(keys: &KeyBindings) -> Self {
        Self {
            gameplay: InputConfig::from_bindings(InputContext::Gameplay, gameplay_bindings(keys)),
            menu: InputConfig::from_bindings(InputContext::Menu, menu_bindings()),
        }
    }

    /// Rebuild the gameplay table after the user changed a key
    pub fn rebuild(&mut self, keys: &KeyBindings) {
        self.gameplay = InputConfig::from_bindings(InputContext::Gameplay, gameplay_bindings(keys));
    }

    /// Get the bindings for a context
    pub fn config(&self, context: InputContext) -> &InputConfig {
        match context {
            InputContext::Gameplay => &self.gameplay,
            InputContext::Menu => &self.menu,
        }
    }

    /// Look up the action a source triggers in `context`
    pub fn action_for(&self, context: InputContext, source: InputSource) -> Option<Action> {
        self.config(context).get_action(source)
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::new(&KeyBindings::default())
    }
}
