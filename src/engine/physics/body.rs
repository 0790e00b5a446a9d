// Kinematic body moved by the tile collision resolver

use crate::core::Rect;
use glam::Vec2;

/// Per-tick motion constants, in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Added to the vertical velocity every tick
    pub gravity: f32,
    /// Downward speed cap
    pub max_fall_speed: f32,
}

/// An axis-aligned box with continuous position and gravity-driven fall
///
/// The position is the top-left corner; collision works on the whole-pixel
/// rect derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub width: i32,
    pub height: i32,
    /// Positive is downward
    pub velocity_y: f32,
    pub on_ground: bool,
}

impl KinematicBody {
    /// Create a body with its top-left corner at `position`
    pub fn new(position: Vec2, width: i32, height: i32) -> Self {
        Self {
            position,
            width,
            height,
            velocity_y: 0.0,
            on_ground: false,
        }
    }

    /// Create a body whose rect is centred on `center`
    pub fn centered_at(center: Vec2, width: i32, height: i32) -> Self {
        let rect = Rect::from_center(center.x.round() as i32, center.y.round() as i32, width, height);
        Self::new(Vec2::new(rect.x as f32, rect.y as f32), width, height)
    }

    /// Whole-pixel rect at the current position
    pub fn rect(&self) -> Rect {
        self.rect_at(self.position)
    }

    /// Collision box if the body stood at `position`
    pub fn rect_at(&self, position: Vec2) -> Rect {
        Rect::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            self.width,
            self.height,
        )
    }

    /// Get the center of the body
    pub fn center(&self) -> Vec2 {
        self.rect().center_f32()
    }

    /// Accumulate gravity, clamped to the fall speed cap
    pub fn apply_gravity(&mut self, params: &MotionParams) {
        self.velocity_y = (self.velocity_y + params.gravity).min(params.max_fall_speed);
    }
}
