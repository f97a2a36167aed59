use glam::Vec2;

use crate::core::body::Rect;

/// Side-scrolling camera with a horizontal dead zone.
///
/// The player moves freely inside the middle band of the screen; the view
/// only scrolls once they leave it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Top-left corner of the view in world space.
    pub pos: Vec2,
    /// Visible size in world units.
    pub view: Vec2,
    /// Dead zone as fractions of the view width.
    pub dead_zone: (f32, f32),
    /// Where the target's top sits vertically, as a fraction of view height.
    pub vertical_anchor: f32,
    /// Vertical scroll limits.
    pub vertical_range: (f32, f32),
    /// Right edge of the level. The view never scrolls past it.
    level_width: Option<f32>,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            view: Vec2::new(width, height),
            dead_zone: (0.3, 0.7),
            vertical_anchor: 0.7,
            vertical_range: (-100.0, 100.0),
            level_width: None,
        }
    }

    pub fn with_level_width(mut self, width: f32) -> Self {
        self.level_width = Some(width);
        self
    }

    pub fn set_level_width(&mut self, width: f32) {
        self.level_width = Some(width);
    }

    /// Scroll toward `target` (the followed entity's top-left corner).
    pub fn follow(&mut self, target: Vec2) {
        let screen_x = target.x - self.pos.x;
        let left = self.view.x * self.dead_zone.0;
        let right = self.view.x * self.dead_zone.1;
        if screen_x > right {
            self.pos.x = target.x - right;
        } else if screen_x < left {
            self.pos.x = target.x - left;
        }

        let max_x = self
            .level_width
            .map(|w| (w - self.view.x).max(0.0))
            .unwrap_or(f32::INFINITY);
        self.pos.x = self.pos.x.clamp(0.0, max_x);

        let (min_y, max_y) = self.vertical_range;
        self.pos.y = (target.y - self.view.y * self.vertical_anchor).clamp(min_y, max_y);
    }

    /// Snap straight to the start of the level.
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
    }

    /// Whether any part of `rect` is on screen.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.right() >= self.pos.x
            && rect.left() <= self.pos.x + self.view.x
            && rect.bottom() >= self.pos.y
            && rect.top() <= self.pos.y + self.view.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_inside_dead_zone_does_not_scroll() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.follow(Vec2::new(300.0, 480.0));
        assert_eq!(cam.pos.x, 0.0);
    }

    #[test]
    fn leaving_dead_zone_scrolls() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.follow(Vec2::new(1000.0, 480.0));
        assert!((cam.pos.x - 440.0).abs() < 1e-3);
        cam.follow(Vec2::new(500.0, 480.0));
        assert!((cam.pos.x - 260.0).abs() < 1e-3);
    }

    #[test]
    fn scroll_is_clamped_to_level() {
        let mut cam = Camera::new(800.0, 600.0).with_level_width(2000.0);
        cam.follow(Vec2::new(5000.0, 480.0));
        assert_eq!(cam.pos.x, 1200.0);
        cam.follow(Vec2::new(-50.0, 480.0));
        assert_eq!(cam.pos.x, 0.0);
    }

    #[test]
    fn vertical_offset_is_limited() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.follow(Vec2::new(0.0, 480.0));
        assert!((cam.pos.y - 60.0).abs() < 1e-4);
        cam.follow(Vec2::new(0.0, -400.0));
        assert_eq!(cam.pos.y, -100.0);
    }

    #[test]
    fn visibility_culls_off_screen_rects() {
        let mut cam = Camera::new(800.0, 600.0);
        cam.pos = Vec2::new(1000.0, 0.0);
        assert!(cam.is_visible(&Rect::new(1700.0, 100.0, 64.0, 64.0)));
        assert!(!cam.is_visible(&Rect::new(100.0, 100.0, 64.0, 64.0)));
    }
}
