use glam::Vec2;
use serde::Serialize;

use crate::api::config::Physics;

/// Axis-aligned rectangle anchored at its top-left corner (Y-down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Spatial and physical state shared by every moving thing in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    size: Vec2,
    pub vel: Vec2,
    /// Set by a resolved top-of-platform contact; cleared when a frame's
    /// collision pass finds no support.
    pub on_ground: bool,
    /// Tombstone. Destroyed bodies are skipped and purged at the end of the step.
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
            destroyed: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Size is fixed at construction.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// One fixed simulation step: gravity (unless grounded), then
    /// position += velocity, then horizontal drag.
    pub fn integrate(&mut self, physics: &Physics) {
        if !self.on_ground {
            self.vel.y += physics.gravity;
        }
        self.pos += self.vel;
        self.vel.x *= physics.friction;
    }

    /// Whether the body has dropped past the bottom of the world.
    pub fn below_world(&self, physics: &Physics) -> bool {
        self.pos.y > physics.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_accrues_gravity_each_frame() {
        let physics = Physics::default();
        let mut body = Body::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let mut last_vy = body.vel.y;
        for _ in 0..20 {
            body.integrate(&physics);
            assert!((body.vel.y - last_vy - physics.gravity).abs() < 1e-4);
            last_vy = body.vel.y;
        }
        assert!(body.pos.y > 0.0);
    }

    #[test]
    fn grounded_body_keeps_vertical_velocity() {
        let physics = Physics::default();
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0));
        body.on_ground = true;
        body.integrate(&physics);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.pos.y, 0.0);
    }

    #[test]
    fn friction_damps_horizontal_velocity_after_moving() {
        let physics = Physics::default();
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(10.0)).with_velocity(Vec2::new(10.0, 0.0));
        body.on_ground = true;
        body.integrate(&physics);
        assert_eq!(body.pos.x, 10.0);
        assert!((body.vel.x - 8.5).abs() < 1e-4);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }
}
