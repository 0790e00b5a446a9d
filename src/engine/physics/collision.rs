// Axis-separated sweep against static solid geometry

use super::body::{KinematicBody, MotionParams};
use crate::core::Rect;

/// Static solid geometry the resolver can query
pub trait SolidGeometry {
    /// Solid rectangles whose interior overlaps `area`, in a stable order
    fn solids_overlapping(&self, area: Rect) -> Vec<Rect>;

    /// Horizontal world limits `(min_x, max_x)`, if the world has any
    fn horizontal_bounds(&self) -> Option<(i32, i32)> {
        None
    }
}

/// What happened during one resolver step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub hit_wall: bool,
    pub landed: bool,
    pub hit_ceiling: bool,
}

/// Move horizontally by `dx` and push the body out of any solid it entered
///
/// Returns true when a solid stopped the movement.
pub fn sweep_horizontal(body: &mut KinematicBody, dx: f32, geometry: &dyn SolidGeometry) -> bool {
    body.position.x += dx;
    let mut blocked = false;

    if dx != 0.0 {
        // Several columns can be entered in one step; stop at the nearest
        let solids = geometry.solids_overlapping(body.rect());
        if dx > 0.0 {
            if let Some(left) = solids.iter().map(Rect::left).min() {
                body.position.x = (left - body.width) as f32;
                blocked = true;
            }
        } else if let Some(right) = solids.iter().map(Rect::right).max() {
            body.position.x = right as f32;
            blocked = true;
        }
    }

    if let Some((min_x, max_x)) = geometry.horizontal_bounds() {
        let max_left = (max_x - body.width) as f32;
        if body.position.x < min_x as f32 {
            body.position.x = min_x as f32;
            blocked = true;
        } else if body.position.x > max_left {
            body.position.x = max_left;
            blocked = true;
        }
    }

    blocked
}

/// Move by the current vertical velocity and settle against solids
///
/// `on_ground` is cleared first and only set again when the body lands this
/// tick.
pub fn sweep_vertical(body: &mut KinematicBody, geometry: &dyn SolidGeometry) -> CollisionReport {
    let dy = body.velocity_y;
    body.position.y += dy;
    body.on_ground = false;

    let mut report = CollisionReport::default();
    let solids = geometry.solids_overlapping(body.rect());
    if dy > 0.0 {
        if let Some(top) = solids.iter().map(Rect::top).min() {
            body.position.y = (top - body.height) as f32;
            body.velocity_y = 0.0;
            body.on_ground = true;
            report.landed = true;
        }
    } else if dy < 0.0 {
        if let Some(bottom) = solids.iter().map(Rect::bottom).max() {
            body.position.y = bottom as f32;
            body.velocity_y = 0.0;
            report.hit_ceiling = true;
        }
    }
    report
}

/// Run one full resolver tick: horizontal sweep, gravity, vertical sweep
pub fn resolve(
    body: &mut KinematicBody,
    dx: f32,
    params: &MotionParams,
    geometry: &dyn SolidGeometry,
) -> CollisionReport {
    let hit_wall = sweep_horizontal(body, dx, geometry);
    body.apply_gravity(params);
    let mut report = sweep_vertical(body, geometry);
    report.hit_wall = hit_wall;
    report
}
