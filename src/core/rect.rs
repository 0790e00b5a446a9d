// Integer pixel rectangles

use glam::Vec2;

/// Axis-aligned rectangle in whole pixels, y pointing down
///
/// Edges follow the usual half-open convention: `right()` and `bottom()` are
/// the first pixel *outside* the rectangle, so two rects that share an edge
/// touch without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect of the given size centred on a point
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    /// Left edge x
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge x (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Top edge y
    pub fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge y (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center point, rounded toward the top-left
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Centre in continuous coordinates
    pub fn center_f32(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Move so the left edge sits at `left`
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Move so the top edge sits at `top`
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move so the bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Return a copy moved by the given amount
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// True when the interiors overlap; shared edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Check if a point lies inside
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center(), (25, 40));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(100, 100, 64, 64);
        assert_eq!(r, Rect::new(68, 68, 64, 64));
        assert_eq!(r.center(), (100, 100));
    }

    #[test]
    fn test_edge_setters_keep_size() {
        let mut r = Rect::new(0, 0, 64, 32);
        r.set_right(100);
        assert_eq!(r.left(), 36);
        r.set_bottom(300);
        assert_eq!(r.top(), 268);
        assert_eq!((r.w, r.h), (64, 32));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(32, 0, 32, 32);
        let c = Rect::new(0, 32, 32, 32);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_overlap_intersects() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(31, 31, 32, 32);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::new(0, 0, 0, 10);
        let b = Rect::new(-5, -5, 20, 20);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(5, 5, 10, 10).translate(-5, 3);
        assert_eq!(r, Rect::new(0, 8, 10, 10));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains_point(0, 0));
        assert!(r.contains_point(9, 9));
        assert!(!r.contains_point(10, 5));
    }
}
