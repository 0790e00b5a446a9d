// Engine modules: assets, camera, frame pacing, input, physics

pub mod assets;
pub mod camera;
pub mod game_loop;
pub mod input;
pub mod physics;
