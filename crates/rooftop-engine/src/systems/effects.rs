//! Particle bursts for hits, deaths and pickups.

use glam::Vec2;

use crate::api::config::Physics;
use crate::components::particle::Particle;
use crate::systems::rng::Rng;

/// Owns live particles and the RNG that scatters them.
/// Handed by `&mut` to anything that needs to spawn debris during a step.
pub struct Effects {
    pub particles: Vec<Particle>,
    rng: Rng,
    particle_life: u32,
    death_count: usize,
    pickup_count: usize,
}

impl Effects {
    pub const DEFAULT_DEATH_BURST: usize = 5;
    pub const DEFAULT_PICKUP_BURST: usize = 3;

    /// Create an effects pool with the given RNG seed.
    pub fn new(seed: u64, particle_life: u32) -> Self {
        Effects {
            particles: Vec::with_capacity(64),
            rng: Rng::new(seed.wrapping_add(7919)),
            particle_life,
            death_count: Self::DEFAULT_DEATH_BURST,
            pickup_count: Self::DEFAULT_PICKUP_BURST,
        }
    }

    /// Override how many particles deaths and pickups produce.
    pub fn with_bursts(mut self, death: usize, pickup: usize) -> Self {
        self.death_count = death;
        self.pickup_count = pickup;
        self
    }

    /// Debris for an enemy that just died.
    pub fn death_burst(&mut self, center: Vec2) {
        self.burst(center, self.death_count);
    }

    /// Sparkle for a consumed pickup.
    pub fn pickup_burst(&mut self, center: Vec2) {
        self.burst(center, self.pickup_count);
    }

    /// Spawn `count` particles at `center` with random upward-biased velocities.
    pub fn burst(&mut self, center: Vec2, count: usize) {
        for _ in 0..count {
            let vx = self.rng.spread(5.0);
            let vy = self.rng.spread(5.0) - 5.0;
            let hue = self.rng.range(15.0, 75.0);
            self.particles
                .push(Particle::new(center, Vec2::new(vx, vy), self.particle_life, hue));
        }
    }

    pub fn tick(&mut self, physics: &Physics) {
        for particle in &mut self.particles {
            particle.tick(physics);
        }
    }

    /// Drop expired particles.
    pub fn purge(&mut self) {
        self.particles.retain(|p| !p.body.destroyed);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
