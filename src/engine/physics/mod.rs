// Tile collision for kinematic bodies
//
// Bodies are moved one axis at a time and pushed back out of any solid they
// entered: horizontal first, then gravity, then vertical.

pub mod body;
pub mod collision;

pub use body::{KinematicBody, MotionParams};
pub use collision::{resolve, CollisionReport, SolidGeometry};
