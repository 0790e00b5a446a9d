// Input handling system
//
// Raw keyboard and mouse input is resolved once per event into a logical
// `Action`, using a binding table chosen by the active scene's context.
//
// ## Architecture
//
// - `action`: Game actions, input sources and default bindings
// - `config`: Persistable key layout and binding tables
// - `manager`: Turns winit events into timestamped `InputEvent`s
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, InputContext, Action};
//
// let mut input = InputManager::new(&config.key_bindings);
//
// // In the event loop
// if let Some(event) = input.process_keyboard_event(&key_event, InputContext::Gameplay, now_ms) {
//     if event.is_press(Action::Jump) {
//         player.jump();
//     }
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

pub use action::{Action, InputContext, InputSource};
pub use config::{InputBindings, KeyAction, KeyBindings};
pub use manager::{InputEvent, InputManager};
