//! Short-lived cosmetic debris.

use glam::Vec2;

use crate::api::config::Physics;
use crate::core::body::Body;

/// A ballistic spark. Falls under gravity, never collides, expires after
/// `max_life` frames.
#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Body,
    pub life: u32,
    pub max_life: u32,
    /// Warm hue in degrees, picked at spawn for the renderer.
    pub hue: f32,
}

impl Particle {
    pub const SIZE: f32 = 4.0;

    pub fn new(pos: Vec2, vel: Vec2, life: u32, hue: f32) -> Self {
        Particle {
            body: Body::new(pos, Vec2::splat(Self::SIZE)).with_velocity(vel),
            life,
            max_life: life,
            hue,
        }
    }

    /// Advance one frame. Marks the particle destroyed when its life runs out.
    pub fn tick(&mut self, physics: &Physics) {
        self.body.integrate(physics);
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.body.destroyed = true;
        }
    }

    /// Fade factor for the renderer (1.0 at spawn, 0.0 when expired).
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_expires_after_life() {
        let physics = Physics::default();
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(1.0, -3.0), 3, 30.0);
        p.tick(&physics);
        p.tick(&physics);
        assert!(!p.body.destroyed);
        p.tick(&physics);
        assert!(p.body.destroyed);
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn particle_is_ballistic() {
        let physics = Physics::default();
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(2.0, 0.0), 30, 30.0);
        p.tick(&physics);
        assert_eq!(p.body.pos, Vec2::new(2.0, physics.gravity));
        assert!(p.body.vel.x < 2.0);
    }
}
