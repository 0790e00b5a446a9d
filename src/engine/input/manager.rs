// Input manager - turns raw window input into timestamped game actions

use super::action::{Action, InputContext, InputSource};
use super::config::{InputBindings, KeyBindings};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// One resolved input, delivered to the active scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Raw key or button, kept for key-capture screens
    pub source: InputSource,
    /// Action bound to the source in the active context, if any
    pub action: Option<Action>,
    pub pressed: bool,
    /// Milliseconds since an arbitrary epoch
    pub timestamp_ms: u64,
}

impl InputEvent {
    /// Check if this is a press of `action`
    pub fn is_press(&self, action: Action) -> bool {
        self.pressed && self.action == Some(action)
    }

    /// Check if this is a release of `action`
    pub fn is_release(&self, action: Action) -> bool {
        !self.pressed && self.action == Some(action)
    }
}

/// Resolves keyboard and mouse input against the binding tables
pub struct InputManager {
    bindings: InputBindings,

    /// Sources currently held down, used to drop auto-repeat presses
    held: HashSet<InputSource>,
}

impl InputManager {
    /// Create an input manager for the configured keys
    pub fn new(keys: &KeyBindings) -> Self {
        Self {
            bindings: InputBindings::new(keys),
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(
        &mut self,
        event: &KeyEvent,
        context: InputContext,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        let pressed = event.state == ElementState::Pressed;
        if pressed && event.repeat {
            return None;
        }
        self.translate(InputSource::key(code), pressed, context, timestamp_ms)
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(
        &mut self,
        state: ElementState,
        button: MouseButton,
        context: InputContext,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        let pressed = state == ElementState::Pressed;
        self.translate(InputSource::mouse(button), pressed, context, timestamp_ms)
    }

    /// Resolve a press/release of `source` in the given context
    ///
    /// A second press without an intervening release is swallowed.
    pub fn translate(
        &mut self,
        source: InputSource,
        pressed: bool,
        context: InputContext,
        timestamp_ms: u64,
    ) -> Option<InputEvent> {
        if pressed {
            if !self.held.insert(source) {
                return None;
            }
        } else {
            self.held.remove(&source);
        }

        Some(InputEvent {
            source,
            action: self.bindings.action_for(context, source),
            pressed,
            timestamp_ms,
        })
    }

    /// Apply changed key bindings
    pub fn rebind(&mut self, keys: &KeyBindings) {
        self.bindings.rebuild(keys);
    }

    /// Get the active bindings
    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_press_resolves_action() {
        let mut manager = InputManager::default();
        let event = manager
            .translate(InputSource::key(KeyCode::KeyA), true, InputContext::Gameplay, 42)
            .unwrap();
        assert!(event.is_press(Action::MoveLeft));
        assert_eq!(event.timestamp_ms, 42);
    }

    #[test]
    fn test_repeat_press_is_swallowed() {
        let mut manager = InputManager::default();
        let source = InputSource::key(KeyCode::KeyD);
        assert!(manager
            .translate(source, true, InputContext::Gameplay, 0)
            .is_some());
        assert!(manager
            .translate(source, true, InputContext::Gameplay, 16)
            .is_none());

        let release = manager
            .translate(source, false, InputContext::Gameplay, 32)
            .unwrap();
        assert!(release.is_release(Action::MoveRight));
        assert!(manager
            .translate(source, true, InputContext::Gameplay, 48)
            .is_some());
    }

    #[test]
    fn test_unbound_source_still_reported() {
        let mut manager = InputManager::default();
        let event = manager
            .translate(InputSource::key(KeyCode::KeyZ), true, InputContext::Gameplay, 0)
            .unwrap();
        assert_eq!(event.action, None);
        assert_eq!(event.source, InputSource::key(KeyCode::KeyZ));
    }

    #[test]
    fn test_context_selects_table() {
        let mut manager = InputManager::default();
        let event = manager
            .translate(InputSource::key(KeyCode::Enter), true, InputContext::Menu, 0)
            .unwrap();
        assert!(event.is_press(Action::Confirm));
    }

    #[test]
    fn test_mouse_attack_buttons() {
        let mut manager = InputManager::default();
        let left = manager
            .process_mouse_button(
                ElementState::Pressed,
                MouseButton::Left,
                InputContext::Gameplay,
                0,
            )
            .unwrap();
        assert!(left.is_press(Action::PrimaryAttack));
        let right = manager
            .process_mouse_button(
                ElementState::Pressed,
                MouseButton::Right,
                InputContext::Gameplay,
                0,
            )
            .unwrap();
        assert!(right.is_press(Action::SecondaryAttack));
    }

    #[test]
    fn test_rebind_updates_lookup() {
        let mut manager = InputManager::default();
        let mut keys = KeyBindings::default();
        keys.rebind(super::super::config::KeyAction::Jump, KeyCode::KeyW);
        manager.rebind(&keys);
        let event = manager
            .translate(InputSource::key(KeyCode::KeyW), true, InputContext::Gameplay, 0)
            .unwrap();
        assert!(event.is_press(Action::Jump));
    }

    #[test]
    fn test_reset_clears_held() {
        let mut manager = InputManager::default();
        let source = InputSource::key(KeyCode::KeyA);
        manager.translate(source, true, InputContext::Gameplay, 0);
        manager.reset();
        assert!(manager
            .translate(source, true, InputContext::Gameplay, 1)
            .is_some());
    }
}
