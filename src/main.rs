use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use game::config::{GameConfig, CONFIG_FILE};
use game::save::SAVE_FILE;
use game::scenes::SceneManager;

const ASSET_ROOT: &str = "assets";

fn apply_screen_mode(window: &Window, fullscreen: bool) {
    let mode = fullscreen.then_some(Fullscreen::Borderless(None));
    if window.fullscreen().is_some() != fullscreen {
        window.set_fullscreen(mode);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Fallen Knight...");

    let config = GameConfig::load_or_default(CONFIG_FILE);
    let [width, height] = config.window_size;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Fallen Knight")
        .with_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(true)
        .build(&event_loop)?;
    apply_screen_mode(&window, config.fullscreen);

    info!("Window created successfully");

    let size = window.inner_size();
    let mut input = InputManager::new(&config.key_bindings);
    let mut game_loop = GameLoop::with_fps_limit(config.effective_fps_limit());
    let mut scenes = SceneManager::new(
        config,
        AssetLoader::new(ASSET_ROOT),
        SAVE_FILE,
        Vec2::new(size.width as f32, size.height as f32),
    );

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    info!("Window resized to {:?}", physical_size);
                    scenes.resize(physical_size.width as f32, physical_size.height as f32);
                }
                WindowEvent::Focused(focused) => {
                    if focused {
                        game_loop.resume();
                    } else {
                        input.reset();
                        game_loop.pause();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let now = game_loop.elapsed_ms();
                    if let Some(event) = input.process_keyboard_event(&event, scenes.input_context(), now) {
                        scenes.handle_input(&event);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let now = game_loop.elapsed_ms();
                    if let Some(event) = input.process_mouse_button(state, button, scenes.input_context(), now) {
                        scenes.handle_input(&event);
                    }
                }
                WindowEvent::RedrawRequested => {
                    // Drawing is left to the presentation layer
                }
                _ => {}
            },
            Event::AboutToWait => {
                let dt = game_loop.begin_frame();
                scenes.update(dt);

                if scenes.take_config_changed() {
                    let config = scenes.config();
                    input.rebind(&config.key_bindings);
                    game_loop.set_fps_limit(config.effective_fps_limit());
                    apply_screen_mode(&window, config.fullscreen);
                }

                if !scenes.is_running() {
                    elwt.exit();
                    return;
                }

                match game_loop.next_frame_deadline() {
                    Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => elwt.set_control_flow(ControlFlow::Poll),
                }
                window.request_redraw();
            }
            Event::LoopExiting => {
                if let Err(e) = scenes.config().save(CONFIG_FILE) {
                    warn!("Could not save config: {}", e);
                }
                info!("Shut down");
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
