use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World-wide physics constants. Passed by reference into every integration
/// and collision call; never stored inside entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Added to vertical velocity every frame while airborne (Y-down).
    pub gravity: f32,
    /// Multiplies horizontal velocity every frame.
    pub friction: f32,
    /// Width of the visible screen in world units.
    pub world_width: f32,
    /// Anything below this Y has fallen out of the world.
    pub world_height: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            friction: 0.85,
            world_width: 800.0,
            world_height: 600.0,
        }
    }
}

/// Player movement and combat tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: Vec2,
    pub speed: f32,
    pub jump_power: f32,
    pub max_health: i32,
    /// Frames an attack stays active.
    pub attack_duration: u32,
    /// Frames of damage immunity after a hit.
    pub invulnerability_duration: u32,
    /// Fallback spawn point when a level does not name one.
    pub start: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::splat(64.0),
            speed: 12.0,
            jump_power: 15.0,
            max_health: 6,
            attack_duration: 20,
            invulnerability_duration: 60,
            start: Vec2::new(100.0, 400.0),
        }
    }
}

/// One row of the player's landing-offset table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingBand {
    /// Platforms whose top is at or below this Y belong to the band.
    pub min_top: f32,
    /// Pixels the player sprite sinks into the surface when standing on it.
    pub offset: f32,
}

/// Player landing offsets keyed by the vertical band a platform occupies.
/// Ground-tier tiles and elevated tiles use different sprite calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingBands {
    /// Checked in order; first band whose `min_top` the platform reaches wins.
    pub bands: Vec<LandingBand>,
    /// Offset for platforms above every band.
    pub fallback: f32,
}

impl LandingBands {
    pub fn offset_for(&self, platform_top: f32) -> f32 {
        self.bands
            .iter()
            .find(|band| platform_top >= band.min_top)
            .map(|band| band.offset)
            .unwrap_or(self.fallback)
    }
}

impl Default for LandingBands {
    fn default() -> Self {
        Self {
            bands: vec![LandingBand { min_top: 600.0 - 64.0, offset: 8.0 }],
            fallback: 4.0,
        }
    }
}

/// Static configuration for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Fixed timestep in seconds (default: 1/60). One step = one frame.
    pub fixed_dt: f32,
    pub physics: Physics,
    pub player: PlayerTuning,
    pub landing_bands: LandingBands,
    /// Particles spawned when an enemy dies.
    pub death_burst: usize,
    /// Particles spawned when an item is collected.
    pub pickup_burst: usize,
    /// Frames a particle lives.
    pub particle_life: u32,
    /// Seed for the effects RNG.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            physics: Physics::default(),
            player: PlayerTuning::default(),
            landing_bands: LandingBands::default(),
            death_burst: 5,
            pickup_burst: 3,
            particle_life: 30,
            seed: 42,
        }
    }
}

impl WorldConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
