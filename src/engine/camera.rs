// Smoothed follow camera for the 2D world

use crate::core::Rect;
use glam::Vec2;

/// Fraction of the remaining distance covered every tick
pub const DEFAULT_SMOOTHING: f32 = 0.1;

/// Camera that eases towards keeping a target in the centre of the viewport
///
/// Smoothing is a constant per-tick factor, so the follow speed depends on the
/// frame rate. The same offset is applied to tiles and sprites alike.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Top-left corner of the view in world space
    offset: Vec2,
    viewport: Vec2,
    smoothing: f32,
}

impl Camera {
    /// Create a camera at the origin with the default smoothing
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    /// Set the follow smoothing (1.0 snaps every frame)
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    /// Get the top-left world position of the view
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Get the viewport size in pixels
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn desired_offset(&self, target_center: Vec2) -> Vec2 {
        target_center - self.viewport / 2.0
    }

    /// Ease the view towards the target (called once per tick)
    pub fn update(&mut self, target_center: Vec2) {
        let desired = self.desired_offset(target_center);
        self.offset += (desired - self.offset) * self.smoothing;
    }

    /// Jump straight to the target, used when a session starts
    pub fn snap_to(&mut self, target_center: Vec2) {
        self.offset = self.desired_offset(target_center);
    }

    /// Viewport size changed; keep the current view centre where it is
    pub fn resize(&mut self, width: f32, height: f32) {
        let center = self.offset + self.viewport / 2.0;
        self.viewport = Vec2::new(width, height);
        self.offset = center - self.viewport / 2.0;
    }

    /// Project a world rect onto the screen
    pub fn apply(&self, rect: Rect) -> Rect {
        rect.translate(-self.offset.x.round() as i32, -self.offset.y.round() as i32)
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos - self.offset
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos + self.offset
    }

    /// The world area currently on screen
    pub fn visible_area(&self) -> Rect {
        Rect::new(
            self.offset.x.floor() as i32,
            self.offset.y.floor() as i32,
            self.viewport.x.ceil() as i32 + 1,
            self.viewport.y.ceil() as i32 + 1,
        )
    }
}
