// Scene manager - owns the active scene and follows its commands

use std::path::PathBuf;

use glam::Vec2;
use log::{info, warn};

use super::{DialogScene, GameSession, MenuScene, Scene, SceneCommand, SceneContext, SceneId, SettingsScene};
use crate::engine::assets::AssetLoader;
use crate::engine::input::{InputContext, InputEvent};
use crate::game::config::GameConfig;
use crate::game::level::FIRST_LEVEL;
use crate::game::save::SaveState;

pub struct SceneManager {
    config: GameConfig,
    loader: AssetLoader,
    save_path: PathBuf,

    current: Box<dyn Scene>,
    /// Main menu kept while another scene is active
    menu: Option<Box<dyn Scene>>,
    /// Level and save the next game scene starts from
    level_id: String,
    pending_save: Option<SaveState>,

    viewport: Vec2,
    config_changed: bool,
    running: bool,
}

impl SceneManager {
    /// Create a manager starting at the main menu
    pub fn new(config: GameConfig, loader: AssetLoader, save_path: impl Into<PathBuf>, viewport: Vec2) -> Self {
        let save_path = save_path.into();
        let can_continue = SaveState::exists(&save_path);
        Self {
            config,
            loader,
            save_path,
            current: Box::new(MenuScene::new(can_continue)),
            menu: None,
            level_id: FIRST_LEVEL.to_string(),
            pending_save: None,
            viewport,
            config_changed: false,
            running: true,
        }
    }

    /// Get the active scene
    pub fn current_id(&self) -> SceneId {
        self.current.id()
    }

    /// Get the input context of the active scene
    pub fn input_context(&self) -> InputContext {
        self.current.input_context()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a scene changed the config since the last call
    pub fn take_config_changed(&mut self) -> bool {
        std::mem::take(&mut self.config_changed)
    }

    /// Route an input event to the active scene
    pub fn handle_input(&mut self, event: &InputEvent) {
        let mut ctx = SceneContext::new(&mut self.config, &self.loader, &self.save_path);
        let command = self.current.handle_input(event, &mut ctx);
        self.config_changed |= ctx.config_changed;
        self.apply(command);
    }

    /// Update the active scene
    pub fn update(&mut self, dt: f32) {
        let mut ctx = SceneContext::new(&mut self.config, &self.loader, &self.save_path);
        let command = self.current.update(dt, &mut ctx);
        self.config_changed |= ctx.config_changed;
        self.apply(command);
    }

    /// Resize the active scene and remember the viewport for the next
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.current.resize(width, height);
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::None => {}
            SceneCommand::Exit => {
                info!("Exit requested");
                self.running = false;
            }
            SceneCommand::Back => self.return_to_menu(),
            SceneCommand::Goto(action) => self.follow(&action),
        }
    }

    fn follow(&mut self, action: &str) {
        match action {
            "continue" => {
                self.pending_save = SaveState::load_or_none(&self.save_path);
                self.start_game();
            }
            "new_game" => {
                self.level_id = FIRST_LEVEL.to_string();
                self.pending_save = None;
                let dialog = DialogScene::load(&self.loader, &self.level_id);
                self.switch_to(Box::new(dialog));
            }
            "settings" => self.switch_to(Box::new(SettingsScene::new())),
            "game" => self.start_game(),
            other => warn!("Unknown scene action '{}'", other),
        }
    }

    fn start_game(&mut self) {
        let session = GameSession::load(
            &self.loader,
            &self.config,
            &self.level_id,
            self.pending_save.take(),
            self.viewport,
        );
        self.switch_to(Box::new(session));
    }

    fn return_to_menu(&mut self) {
        let menu: Box<dyn Scene> = match self.menu.take() {
            Some(menu) => menu,
            None => Box::new(MenuScene::new(SaveState::exists(&self.save_path))),
        };
        self.switch_to(menu);
    }

    fn switch_to(&mut self, mut scene: Box<dyn Scene>) {
        info!("Scene {:?} -> {:?}", self.current.id(), scene.id());
        scene.resize(self.viewport.x, self.viewport.y);
        {
            let mut ctx = SceneContext::new(&mut self.config, &self.loader, &self.save_path);
            scene.on_enter(&mut ctx);
            self.config_changed |= ctx.config_changed;
        }

        let previous = std::mem::replace(&mut self.current, scene);
        if previous.id() == SceneId::Menu {
            self.menu = Some(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::game::scenes::test_support::{key_press, press, scratch};
    use winit::keyboard::KeyCode;

    fn manager(name: &str) -> (SceneManager, PathBuf) {
        let dir = scratch(name);
        let save = dir.join("savegame.dat");
        let scenes = SceneManager::new(
            GameConfig::default(),
            AssetLoader::new(&dir),
            save.clone(),
            Vec2::new(320.0, 240.0),
        );
        (scenes, dir)
    }

    #[test]
    fn test_new_game_runs_dialog_then_game() {
        let (mut scenes, dir) = manager("mgr_new_game");
        std::fs::create_dir_all(dir.join("chapters/level_0")).unwrap();
        std::fs::write(dir.join("chapters/level_0/story.txt"), "Wake up\nGo").unwrap();

        assert_eq!(scenes.current_id(), SceneId::Menu);
        assert_eq!(scenes.input_context(), InputContext::Menu);
        scenes.handle_input(&press(Action::Confirm));
        assert_eq!(scenes.current_id(), SceneId::Dialog);

        scenes.handle_input(&press(Action::Confirm));
        scenes.update(0.016);
        assert_eq!(scenes.current_id(), SceneId::Dialog);
        scenes.handle_input(&press(Action::Confirm));
        assert_eq!(scenes.current_id(), SceneId::Game);
        assert_eq!(scenes.input_context(), InputContext::Gameplay);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_dialog_goes_to_game() {
        let (mut scenes, dir) = manager("mgr_no_dialog");
        scenes.handle_input(&press(Action::Confirm));
        assert_eq!(scenes.current_id(), SceneId::Dialog);
        scenes.update(0.016);
        assert_eq!(scenes.current_id(), SceneId::Game);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_back_from_game_saves_and_enables_continue() {
        let (mut scenes, dir) = manager("mgr_continue");
        scenes.handle_input(&press(Action::Confirm));
        scenes.update(0.016);
        assert_eq!(scenes.current_id(), SceneId::Game);

        scenes.handle_input(&press(Action::Back));
        assert_eq!(scenes.current_id(), SceneId::Menu);
        assert!(SaveState::exists(dir.join("savegame.dat")));

        // The cached menu now offers Continue above New Game
        scenes.handle_input(&press(Action::MenuUp));
        scenes.handle_input(&press(Action::Confirm));
        assert_eq!(scenes.current_id(), SceneId::Game);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_settings_round_trip_flags_config() {
        let (mut scenes, dir) = manager("mgr_settings");
        scenes.handle_input(&press(Action::MenuDown));
        scenes.handle_input(&press(Action::Confirm));
        assert_eq!(scenes.current_id(), SceneId::Settings);

        scenes.handle_input(&press(Action::Confirm));
        scenes.handle_input(&key_press(KeyCode::KeyJ, None, 0));
        assert_eq!(scenes.config().key_bindings.left, KeyCode::KeyJ);
        assert!(scenes.take_config_changed());
        assert!(!scenes.take_config_changed());

        scenes.handle_input(&press(Action::Back));
        assert_eq!(scenes.current_id(), SceneId::Menu);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_exit_and_unknown_action() {
        let (mut scenes, dir) = manager("mgr_exit");
        scenes.apply(SceneCommand::goto("credits"));
        assert_eq!(scenes.current_id(), SceneId::Menu);
        assert!(scenes.is_running());

        scenes.handle_input(&press(Action::Back));
        assert!(!scenes.is_running());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
