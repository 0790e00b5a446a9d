// Main menu

use super::{Scene, SceneCommand, SceneContext, SceneId};
use crate::engine::input::{Action, InputEvent};
use crate::game::save::SaveState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Continue,
    NewGame,
    Settings,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [Self::Continue, Self::NewGame, Self::Settings, Self::Exit];

    /// Text shown for the item
    pub fn label(self) -> &'static str {
        match self {
            Self::Continue => "CONTINUE",
            Self::NewGame => "NEW GAME",
            Self::Settings => "SETTINGS",
            Self::Exit => "EXIT",
        }
    }

    fn command(self) -> SceneCommand {
        match self {
            Self::Continue => SceneCommand::goto("continue"),
            Self::NewGame => SceneCommand::goto("new_game"),
            Self::Settings => SceneCommand::goto("settings"),
            Self::Exit => SceneCommand::Exit,
        }
    }
}

pub struct MenuScene {
    selected: usize,
    can_continue: bool,
}

impl MenuScene {
    /// Create the menu; Continue is enabled only with a save
    pub fn new(can_continue: bool) -> Self {
        let mut menu = Self {
            selected: 0,
            can_continue,
        };
        menu.ensure_enabled_selection();
        menu
    }

    /// Check if an item can be chosen
    pub fn is_enabled(&self, item: MenuItem) -> bool {
        item != MenuItem::Continue || self.can_continue
    }

    /// Get the highlighted item
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    /// Items with their enabled flag, in display order
    pub fn items(&self) -> impl Iterator<Item = (MenuItem, bool)> + '_ {
        MenuItem::ALL.iter().map(|&item| (item, self.is_enabled(item)))
    }

    /// Move the cursor by `step`, wrapping and skipping disabled items
    fn step(&mut self, step: isize) {
        let count = MenuItem::ALL.len() as isize;
        let mut index = self.selected as isize;
        for _ in 0..count {
            index = (index + step).rem_euclid(count);
            if self.is_enabled(MenuItem::ALL[index as usize]) {
                self.selected = index as usize;
                return;
            }
        }
    }

    fn ensure_enabled_selection(&mut self) {
        if !self.is_enabled(self.selected()) {
            self.step(1);
        }
    }
}

impl Scene for MenuScene {
    fn id(&self) -> SceneId {
        SceneId::Menu
    }

    fn on_enter(&mut self, ctx: &mut SceneContext) {
        self.can_continue = SaveState::exists(ctx.save_path);
        self.ensure_enabled_selection();
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut SceneContext) -> SceneCommand {
        if !event.pressed {
            return SceneCommand::None;
        }
        match event.action {
            Some(Action::MenuUp) => self.step(-1),
            Some(Action::MenuDown) => self.step(1),
            Some(Action::Confirm) => return self.selected().command(),
            Some(Action::Back) => return SceneCommand::Exit,
            _ => {}
        }
        SceneCommand::None
    }
}
