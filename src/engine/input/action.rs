// Logical game actions and default bindings

use super::config::KeyBindings;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Sprint,
    Block,

    // Combat
    PrimaryAttack,
    SecondaryAttack,
    /// Equip slot index (0-3)
    Skill(usize),

    // Menus
    MenuUp,
    MenuDown,
    Confirm,
    Back,
}

/// Which binding table an input is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    Gameplay,
    Menu,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Keyboard source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Mouse button source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Gameplay bindings built from the user's configured keys
pub fn gameplay_bindings(keys: &KeyBindings) -> Vec<(InputSource, Action)> {
    let mut bindings = vec![
        (InputSource::key(keys.left), Action::MoveLeft),
        (InputSource::key(keys.right), Action::MoveRight),
        (InputSource::key(keys.jump), Action::Jump),
        (InputSource::key(keys.sprint), Action::Sprint),
        (InputSource::key(keys.block), Action::Block),
        (InputSource::mouse(MouseButton::Left), Action::PrimaryAttack),
        (InputSource::mouse(MouseButton::Right), Action::SecondaryAttack),
        (InputSource::key(KeyCode::Escape), Action::Back),
    ];
    for (slot, key) in keys.skills.iter().enumerate() {
        bindings.push((InputSource::key(*key), Action::Skill(slot)));
    }
    bindings
}

/// Fixed menu navigation bindings
pub fn menu_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowUp), Action::MenuUp),
        (InputSource::key(KeyCode::KeyW), Action::MenuUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MenuDown),
        (InputSource::key(KeyCode::KeyS), Action::MenuDown),
        (InputSource::key(KeyCode::Enter), Action::Confirm),
        (InputSource::key(KeyCode::Space), Action::Confirm),
        (InputSource::mouse(MouseButton::Left), Action::Confirm),
        (InputSource::key(KeyCode::Escape), Action::Back),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_gameplay_bindings_follow_config() {
        let mut keys = KeyBindings::default();
        keys.jump = KeyCode::KeyK;
        let bindings = gameplay_bindings(&keys);
        assert!(bindings.contains(&(InputSource::key(KeyCode::KeyK), Action::Jump)));
        assert!(!bindings.contains(&(InputSource::key(KeyCode::Space), Action::Jump)));
    }

    #[test]
    fn test_gameplay_bindings_cover_all_skill_slots() {
        let bindings = gameplay_bindings(&KeyBindings::default());
        for slot in 0..4 {
            assert!(bindings.iter().any(|(_, a)| *a == Action::Skill(slot)));
        }
    }

    #[test]
    fn test_attacks_use_mouse() {
        let bindings = gameplay_bindings(&KeyBindings::default());
        assert!(bindings.contains(&(
            InputSource::Mouse(MouseButton::Left),
            Action::PrimaryAttack
        )));
        assert!(bindings.contains(&(
            InputSource::Mouse(MouseButton::Right),
            Action::SecondaryAttack
        )));
    }

    #[test]
    fn test_no_duplicate_sources_in_defaults() {
        for bindings in [gameplay_bindings(&KeyBindings::default()), menu_bindings()] {
            let mut seen = HashSet::new();
            for (source, _) in bindings {
                assert!(seen.insert(source), "Duplicate input source {:?}", source);
            }
        }
    }
}
