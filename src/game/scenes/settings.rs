// Settings screen: key rebinding, video and audio options

use log::info;
use winit::keyboard::KeyCode;

use super::{Scene, SceneCommand, SceneContext, SceneId};
use crate::engine::input::{Action, InputEvent, InputSource, KeyAction};
use crate::game::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOption {
    Key(KeyAction),
    VSync,
    FpsLimit,
    ScreenMode,
    MusicVolume,
    Back,
}

impl SettingsOption {
    pub const ALL: [SettingsOption; 10] = [
        Self::Key(KeyAction::Left),
        Self::Key(KeyAction::Right),
        Self::Key(KeyAction::Jump),
        Self::Key(KeyAction::Sprint),
        Self::Key(KeyAction::Block),
        Self::VSync,
        Self::FpsLimit,
        Self::ScreenMode,
        Self::MusicVolume,
        Self::Back,
    ];

    /// Text shown for the option
    pub fn label(self) -> &'static str {
        match self {
            Self::Key(action) => action.label(),
            Self::VSync => "VSync",
            Self::FpsLimit => "FPS Limit",
            Self::ScreenMode => "Screen Mode",
            Self::MusicVolume => "Music Volume",
            Self::Back => "Back",
        }
    }

    /// Current value as shown next to the label
    pub fn value(self, config: &GameConfig) -> String {
        match self {
            Self::Key(action) => format!("{:?}", config.key_bindings.get(action)),
            Self::VSync => on_off(config.vsync).to_string(),
            Self::FpsLimit => config.fps_limit.to_string(),
            Self::ScreenMode => {
                if config.fullscreen {
                    "Fullscreen".to_string()
                } else {
                    "Windowed".to_string()
                }
            }
            Self::MusicVolume => format!("{:.0}%", config.music_volume * 100.0),
            Self::Back => String::new(),
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

#[derive(Default)]
pub struct SettingsScene {
    selected: usize,
    /// Key action waiting for the next key press
    waiting_for: Option<KeyAction>,
}

impl SettingsScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the highlighted option
    pub fn selected(&self) -> SettingsOption {
        SettingsOption::ALL[self.selected]
    }

    /// Get the key action waiting for a key press
    pub fn waiting_for(&self) -> Option<KeyAction> {
        self.waiting_for
    }

    fn step(&mut self, step: isize) {
        let count = SettingsOption::ALL.len() as isize;
        self.selected = (self.selected as isize + step).rem_euclid(count) as usize;
    }

    fn activate(&mut self, ctx: &mut SceneContext) -> SceneCommand {
        let config = &mut *ctx.config;
        match self.selected() {
            SettingsOption::Key(action) => {
                self.waiting_for = Some(action);
                return SceneCommand::None;
            }
            SettingsOption::VSync => config.toggle_vsync(),
            SettingsOption::FpsLimit => config.cycle_fps_limit(),
            SettingsOption::ScreenMode => config.toggle_fullscreen(),
            SettingsOption::MusicVolume => config.cycle_music_volume(),
            SettingsOption::Back => return SceneCommand::Back,
        }
        ctx.config_changed = true;
        SceneCommand::None
    }

    fn capture_key(&mut self, action: KeyAction, key: KeyCode, ctx: &mut SceneContext) {
        self.waiting_for = None;
        if key == KeyCode::Escape {
            return;
        }
        info!("Rebinding {} to {:?}", action.label(), key);
        ctx.config.rebind(action, key);
        ctx.config_changed = true;
    }
}

impl Scene for SettingsScene {
    fn id(&self) -> SceneId {
        SceneId::Settings
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        if !event.pressed {
            return SceneCommand::None;
        }

        if let Some(action) = self.waiting_for {
            if let InputSource::Keyboard(key) = event.source {
                self.capture_key(action, key, ctx);
            }
            return SceneCommand::None;
        }

        match event.action {
            Some(Action::MenuUp) => self.step(-1),
            Some(Action::MenuDown) => self.step(1),
            Some(Action::Confirm) => return self.activate(ctx),
            Some(Action::Back) => return SceneCommand::Back,
            _ => {}
        }
        SceneCommand::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::AssetLoader;
    use crate::game::scenes::test_support::{key_press, press, scratch};

    fn select(scene: &mut SettingsScene, option: SettingsOption) {
        scene.selected = SettingsOption::ALL
            .iter()
            .position(|&o| o == option)
            .unwrap();
    }

    #[test]
    fn test_rebind_flow() {
        let dir = scratch("settings_rebind");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = SettingsScene::new();
        select(&mut scene, SettingsOption::Key(KeyAction::Jump));
        scene.handle_input(&press(Action::Confirm), &mut ctx);
        assert_eq!(scene.waiting_for(), Some(KeyAction::Jump));

        // Bound keys are captured raw while waiting, not as navigation
        let cmd = scene.handle_input(&key_press(KeyCode::KeyW, Some(Action::MenuUp), 0), &mut ctx);
        assert_eq!(cmd, SceneCommand::None);
        assert_eq!(scene.waiting_for(), None);
        assert!(ctx.config_changed);
        assert_eq!(ctx.config.key_bindings.jump, KeyCode::KeyW);
        assert_eq!(scene.selected(), SettingsOption::Key(KeyAction::Jump));
    }

    #[test]
    fn test_escape_cancels_capture() {
        let dir = scratch("settings_cancel");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = SettingsScene::new();
        scene.handle_input(&press(Action::Confirm), &mut ctx);
        let cmd = scene.handle_input(&key_press(KeyCode::Escape, Some(Action::Back), 0), &mut ctx);
        assert_eq!(cmd, SceneCommand::None);
        assert_eq!(scene.waiting_for(), None);
        assert_eq!(ctx.config.key_bindings.left, KeyCode::KeyA);
        assert!(!ctx.config_changed);
    }

    #[test]
    fn test_toggles() {
        let dir = scratch("settings_toggles");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = SettingsScene::new();
        select(&mut scene, SettingsOption::VSync);
        scene.handle_input(&press(Action::Confirm), &mut ctx);
        assert!(!ctx.config.vsync);

        scene.handle_input(&press(Action::MenuDown), &mut ctx);
        scene.handle_input(&press(Action::Confirm), &mut ctx);
        assert_eq!(ctx.config.fps_limit, 90);

        scene.handle_input(&press(Action::MenuDown), &mut ctx);
        scene.handle_input(&press(Action::Confirm), &mut ctx);
        assert!(!ctx.config.fullscreen);
        assert_eq!(SettingsOption::ScreenMode.value(ctx.config), "Windowed");
    }

    #[test]
    fn test_back() {
        let dir = scratch("settings_back");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = SettingsScene::new();
        assert_eq!(scene.handle_input(&press(Action::Back), &mut ctx), SceneCommand::Back);

        scene.handle_input(&press(Action::MenuUp), &mut ctx);
        assert_eq!(scene.selected(), SettingsOption::Back);
        assert_eq!(scene.handle_input(&press(Action::Confirm), &mut ctx), SceneCommand::Back);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SettingsOption::Key(KeyAction::Left).label(), "Move Left");
        assert_eq!(SettingsOption::MusicVolume.value(&GameConfig::default()), "70%");
    }
}
