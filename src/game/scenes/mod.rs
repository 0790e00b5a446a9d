// Scenes and the flow between them
//
// Each scene consumes input events and a per-frame update, and answers with a
// `SceneCommand`. The `SceneManager` turns those commands into scene changes.

pub mod dialog;
pub mod gameplay;
pub mod manager;
pub mod menu;
pub mod settings;

pub use dialog::DialogScene;
pub use gameplay::GameSession;
pub use manager::SceneManager;
pub use menu::{MenuItem, MenuScene};
pub use settings::{SettingsOption, SettingsScene};

use std::path::Path;

use crate::engine::assets::AssetLoader;
use crate::engine::input::{InputContext, InputEvent};
use crate::game::config::GameConfig;

/// What a scene wants to happen after this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneCommand {
    /// Keep running the current scene
    None,
    /// Quit the application
    Exit,
    /// Return to the main menu
    Back,
    /// Follow a named action, e.g. "new_game" or "game"
    Goto(String),
}

impl SceneCommand {
    /// Command to follow a named action
    pub fn goto(action: &str) -> Self {
        Self::Goto(action.to_string())
    }

    pub fn is_none(&self) -> bool {
        *self == Self::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Menu,
    Dialog,
    Settings,
    Game,
}

/// Shared state handed to scenes
pub struct SceneContext<'a> {
    pub config: &'a mut GameConfig,
    pub loader: &'a AssetLoader,
    pub save_path: &'a Path,
    /// Set when a scene changed the config
    pub config_changed: bool,
}

impl<'a> SceneContext<'a> {
    /// Create a context over the shared state
    pub fn new(config: &'a mut GameConfig, loader: &'a AssetLoader, save_path: &'a Path) -> Self {
        Self {
            config,
            loader,
            save_path,
            config_changed: false,
        }
    }
}

pub trait Scene {
    fn id(&self) -> SceneId;

    /// Binding table used to resolve input for this scene
    fn input_context(&self) -> InputContext {
        InputContext::Menu
    }

    /// Called every time the scene becomes active
    fn on_enter(&mut self, _ctx: &mut SceneContext) {}

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext) -> SceneCommand;

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        SceneCommand::None
    }

    /// The window's drawable area changed
    fn resize(&mut self, _width: f32, _height: f32) {}
}
