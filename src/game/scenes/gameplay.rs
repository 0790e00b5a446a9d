// Gameplay session: player, level geometry and camera

use glam::Vec2;
use log::{debug, info, warn};

use super::{Scene, SceneCommand, SceneContext, SceneId};
use crate::engine::assets::AssetLoader;
use crate::engine::camera::Camera;
use crate::engine::input::{Action, InputContext, InputEvent, InputSource};
use crate::game::characters::{Player, PlayerEvent, PlayerStateMachine, BASE_STATS};
use crate::game::config::GameConfig;
use crate::game::hud::HudSnapshot;
use crate::game::level::{Tile, TileGrid};
use crate::game::save::SaveState;

pub struct GameSession {
    level_id: String,
    player: Player,
    grid: TileGrid,
    camera: Camera,
}

impl GameSession {
    /// Assemble a session from already loaded parts
    pub fn new(level_id: &str, player: Player, grid: TileGrid, viewport: Vec2) -> Self {
        let mut camera = Camera::new(viewport.x, viewport.y);
        camera.snap_to(player.center());
        Self {
            level_id: level_id.to_string(),
            player,
            grid,
            camera,
        }
    }

    /// Load the level and place the player from the save, the level spawn or
    /// the default start, in that order
    pub fn load(
        loader: &AssetLoader,
        config: &GameConfig,
        level_id: &str,
        saved: Option<SaveState>,
        viewport: Vec2,
    ) -> Self {
        let grid = TileGrid::load_or_empty(loader, level_id);
        let machine = PlayerStateMachine::load(loader);
        let keys = config.key_bindings.skills;

        let player = match (saved, grid.spawn()) {
            (Some(save), _) => Player::from_save(save, machine, keys),
            (None, Some(spawn)) => Player::new(spawn, BASE_STATS.max_health, machine, keys),
            (None, None) => Player::from_save(SaveState::default(), machine, keys),
        };
        info!("Starting level '{}' at {:?}", level_id, player.center());
        Self::new(level_id, player, grid, viewport)
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Capture the HUD values
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.player)
    }

    /// Tiles under the camera, in world coordinates
    pub fn visible_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.grid.visible_tiles(self.camera.visible_area())
    }

    fn save(&self, ctx: &SceneContext) {
        if self.player.health() <= 0 {
            return;
        }
        let state = self.player.save_state();
        match state.write(ctx.save_path) {
            Ok(()) => info!("Saved game at ({}, {})", state.x, state.y),
            Err(e) => warn!("Could not save game: {}", e),
        }
    }
}

impl Scene for GameSession {
    fn id(&self) -> SceneId {
        SceneId::Game
    }

    fn input_context(&self) -> InputContext {
        InputContext::Gameplay
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        let Some(action) = event.action else {
            return SceneCommand::None;
        };
        let player = &mut self.player;
        let now = event.timestamp_ms;

        match (action, event.pressed) {
            (Action::MoveLeft, held) => player.set_move_left(held),
            (Action::MoveRight, held) => player.set_move_right(held),
            (Action::Jump, true) => player.jump(),
            (Action::Sprint, true) => player.toggle_sprint(),
            (Action::Block, true) => player.start_block(),
            (Action::Block, false) => player.stop_block(),
            (Action::PrimaryAttack, true) => player.primary_attack(),
            (Action::SecondaryAttack, true) => player.secondary_attack(now),
            (Action::Skill(slot), true) => {
                match event.source {
                    InputSource::Keyboard(key) => player.use_skill(key, now),
                    InputSource::Mouse(_) => player.use_skill_slot(slot, now),
                };
            }
            (Action::Back, true) => {
                self.save(ctx);
                return SceneCommand::Back;
            }
            _ => {}
        }
        SceneCommand::None
    }

    fn update(&mut self, dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        self.player.update(dt);
        if self.player.is_removed() {
            info!("Player removed, leaving '{}'", self.level_id);
            return SceneCommand::Back;
        }

        self.player.step_physics(&self.grid);
        self.camera.update(self.player.center());

        for event in self.player.drain_events() {
            match event {
                PlayerEvent::SkillCast { kind, origin, facing_left } => {
                    debug!("{} cast at {:?} (facing left: {})", kind.name(), origin, facing_left)
                }
                PlayerEvent::Died => debug!("Death animation started"),
            }
        }
        SceneCommand::None
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::PlayerState;
    use crate::game::scenes::test_support::{click, event, key_press, press, scratch};
    use approx::assert_relative_eq;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    const KEYS: [KeyCode; 4] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];

    fn floor_grid() -> TileGrid {
        let mut rows = vec!["...................."; 9];
        rows.push("####################");
        TileGrid::from_ascii(&rows, 32)
    }

    fn session(center: Vec2) -> GameSession {
        let player = Player::new(center, 100, PlayerStateMachine::placeholder(), KEYS).with_seed(7);
        GameSession::new("test", player, floor_grid(), Vec2::new(320.0, 240.0))
    }

    #[test]
    fn test_player_lands_on_floor() {
        let dir = scratch("game_land");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 100.0));
        for _ in 0..100 {
            assert_eq!(game.update(0.016, &mut ctx), SceneCommand::None);
        }
        assert!(game.player().on_ground());
        assert_eq!(game.player().rect().bottom(), 288);
        assert!(game.visible_tiles().count() > 0);
    }

    #[test]
    fn test_walk_and_stop() {
        let dir = scratch("game_walk");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 256.0));
        let start = game.player().rect().left();
        game.handle_input(&event(Action::MoveRight, true, 0), &mut ctx);
        game.update(0.016, &mut ctx);
        assert_eq!(game.player().state(), PlayerState::Walk);
        assert_eq!(game.player().rect().left(), start + 5);

        game.handle_input(&event(Action::MoveRight, false, 10), &mut ctx);
        game.update(0.016, &mut ctx);
        assert_eq!(game.player().velocity_x(), 0);
        assert_eq!(game.player().state(), PlayerState::Idle);
    }

    #[test]
    fn test_skill_by_key_and_mouse() {
        let dir = scratch("game_skill");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 256.0));
        game.handle_input(&key_press(KeyCode::Digit1, Some(Action::Skill(0)), 0), &mut ctx);
        assert_eq!(game.player().mana(), 75);

        // A slot action without a key source goes by slot index
        let blink = InputEvent {
            source: InputSource::mouse(MouseButton::Middle),
            action: Some(Action::Skill(3)),
            pressed: true,
            timestamp_ms: 5,
        };
        game.handle_input(&blink, &mut ctx);
        assert_eq!(game.player().mana(), 55);
        assert_eq!(game.update(0.016, &mut ctx), SceneCommand::None);
    }

    #[test]
    fn test_heavy_attack_from_double_click() {
        let dir = scratch("game_heavy");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 256.0));
        game.handle_input(&click(MouseButton::Right, Action::SecondaryAttack, 0), &mut ctx);
        game.handle_input(&click(MouseButton::Right, Action::SecondaryAttack, 250), &mut ctx);
        assert_eq!(game.player().state(), PlayerState::Heavy);
    }

    #[test]
    fn test_back_saves_position() {
        let dir = scratch("game_back");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 256.0));
        assert_eq!(game.handle_input(&press(Action::Back), &mut ctx), SceneCommand::Back);

        let saved = SaveState::load(&save).unwrap().unwrap();
        assert_eq!(saved, SaveState { x: 100, y: 256, health: 100 });
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_death_leaves_without_saving() {
        let dir = scratch("game_death");
        let mut config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let save = dir.join("save.dat");
        let mut ctx = SceneContext::new(&mut config, &loader, &save);

        let mut game = session(Vec2::new(100.0, 256.0));
        game.player_mut().take_damage(500);
        assert_eq!(game.player().state(), PlayerState::Death);

        let mut result = SceneCommand::None;
        for _ in 0..10 {
            result = game.update(0.1, &mut ctx);
            if !result.is_none() {
                break;
            }
        }
        assert_eq!(result, SceneCommand::Back);

        game.handle_input(&press(Action::Back), &mut ctx);
        assert!(!SaveState::exists(&save));
    }

    #[test]
    fn test_resize_keeps_view_centre() {
        let mut game = session(Vec2::new(160.0, 120.0));
        let before = game.camera().visible_area().center_f32();
        game.resize(640.0, 480.0);
        let after = game.camera().visible_area().center_f32();
        assert_relative_eq!(before.x, after.x, epsilon = 1.0);
        assert_relative_eq!(before.y, after.y, epsilon = 1.0);
        assert_eq!(game.camera().viewport_size(), Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_load_places_player() {
        let dir = scratch("game_load");
        std::fs::create_dir_all(dir.join("levels")).unwrap();
        std::fs::write(
            dir.join("levels/level_0.json"),
            r#"{"tile_size": 32, "width": 2, "height": 1,
                "layers": [{"name": "ground", "data": [1, 0]}],
                "spawn": [48.0, 16.0]}"#,
        )
        .unwrap();
        let config = GameConfig::default();
        let loader = AssetLoader::new(&dir);
        let viewport = Vec2::new(320.0, 240.0);

        let fresh = GameSession::load(&loader, &config, "level_0", None, viewport);
        assert_eq!(fresh.player().center(), Vec2::new(48.0, 16.0));
        assert_eq!(fresh.grid().collidable_count(), 1);

        let saved = SaveState { x: 10, y: 20, health: 30 };
        let resumed = GameSession::load(&loader, &config, "level_0", Some(saved), viewport);
        assert_eq!(resumed.player().health(), 30);
        assert_eq!(resumed.player().save_state(), saved);

        let missing = GameSession::load(&loader, &config, "nowhere", None, viewport);
        assert!(missing.grid().is_empty());
        assert_eq!(missing.player().save_state(), SaveState::default());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
