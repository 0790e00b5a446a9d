// Story dialog shown before a chapter

use log::{info, warn};

use super::{Scene, SceneCommand, SceneContext, SceneId};
use crate::engine::assets::AssetLoader;
use crate::engine::input::{Action, InputEvent};
use crate::game::story::{DialogScript, DialogueEntry};

pub struct DialogScene {
    chapter: String,
    script: DialogScript,
    current: usize,
}

impl DialogScene {
    /// Create a dialog scene for `chapter`
    pub fn new(chapter: &str, script: DialogScript) -> Self {
        Self {
            chapter: chapter.to_string(),
            script,
            current: 0,
        }
    }

    /// Load the chapter's script; a missing script leaves the scene empty
    pub fn load(loader: &AssetLoader, chapter: &str) -> Self {
        let script = DialogScript::load(loader, chapter).unwrap_or_else(|e| {
            warn!("Skipping dialog: {}", e);
            DialogScript::default()
        });
        Self::new(chapter, script)
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    pub fn current(&self) -> Option<&DialogueEntry> {
        self.script.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    fn advance(&mut self) -> SceneCommand {
        if self.current + 1 < self.script.len() {
            self.current += 1;
            SceneCommand::None
        } else {
            info!("Dialog for '{}' finished", self.chapter);
            SceneCommand::goto("game")
        }
    }
}

impl Scene for DialogScene {
    fn id(&self) -> SceneId {
        SceneId::Dialog
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut SceneContext) -> SceneCommand {
        if !event.pressed {
            return SceneCommand::None;
        }
        match event.action {
            Some(Action::Confirm) => self.advance(),
            Some(Action::Back) => SceneCommand::goto("game"),
            _ => SceneCommand::None,
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        if self.script.is_empty() {
            SceneCommand::goto("game")
        } else {
            SceneCommand::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use crate::game::scenes::test_support::{click, press, scratch};
    use winit::event::MouseButton;

    fn script(lines: &str) -> DialogScript {
        DialogScript::from_text(lines)
    }

    #[test]
    fn test_advances_then_starts_game() {
        let dir = scratch("dialog_advance");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = DialogScene::new("level_0", script("one\ntwo\nthree"));
        assert_eq!(scene.update(0.016, &mut ctx), SceneCommand::None);
        assert_eq!(scene.current().unwrap().text, "one");

        assert_eq!(scene.handle_input(&press(Action::Confirm), &mut ctx), SceneCommand::None);
        let mouse = click(MouseButton::Left, Action::Confirm, 0);
        assert_eq!(scene.handle_input(&mouse, &mut ctx), SceneCommand::None);
        assert_eq!(scene.current().unwrap().text, "three");
        assert_eq!(
            scene.handle_input(&press(Action::Confirm), &mut ctx),
            SceneCommand::goto("game")
        );
    }

    #[test]
    fn test_escape_skips() {
        let dir = scratch("dialog_skip");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = DialogScene::new("level_0", script("one\ntwo"));
        assert_eq!(
            scene.handle_input(&press(Action::Back), &mut ctx),
            SceneCommand::goto("game")
        );
    }

    #[test]
    fn test_missing_script_goes_straight_to_game() {
        let dir = scratch("dialog_missing");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut scene = DialogScene::load(&loader, "level_0");
        assert!(scene.current().is_none());
        assert_eq!(scene.update(0.016, &mut ctx), SceneCommand::goto("game"));
    }
}
