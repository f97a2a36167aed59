//! Enemy archetypes: one tagged kind, one static stats row per kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::Physics;
use crate::api::types::EntityId;
use crate::components::animation::FrameCycle;
use crate::core::body::Body;
use crate::core::collision::Side;
use crate::systems::effects::Effects;

/// Named enemy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Mouse,
    Dog,
    Squirrel,
    BigCat,
    Bear,
    Fish,
}

/// Velocity-setting strategy evaluated before integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Walk back and forth around the spawn point.
    Patrol,
    /// Run at the player when within `range` horizontally, otherwise patrol.
    Chase { range: f32, multiplier: f32 },
    /// Slow walk, with timed charges at the player.
    Charge {
        range: f32,
        cooldown: u32,
        speed: f32,
        duration: u32,
    },
    /// Sinusoidal bob around the spawn height while drifting sideways.
    Float { amplitude: f32, phase_step: f32 },
}

/// How the archetype's vertical position is governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Pinned to the spawn height every frame.
    Rail,
    /// Full gravity and platform collision.
    Physics,
    /// Height computed by the float strategy. No gravity, no platforms.
    Float,
}

/// Per-kind constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub size: Vec2,
    pub health: i32,
    pub speed: f32,
    pub points: u32,
    pub patrol_distance: f32,
    /// Pixels the sprite sinks into a platform it stands on.
    pub landing_offset: f32,
    pub strategy: Strategy,
    pub motion: Motion,
    pub boss: bool,
}

/// Distance kept inside the patrol bounds so a walker never flips twice at one edge.
pub const PATROL_MARGIN: f32 = 10.0;
/// Frames the hit flash lasts.
pub const DAMAGE_FLASH_FRAMES: u32 = 10;
const ANIMATION_PERIOD: u32 = 15;
const DEFAULT_PATROL_DISTANCE: f32 = 100.0;

static MOUSE: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(32.0, 32.0),
    health: 1,
    speed: 2.0,
    points: 10,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 4.0,
    strategy: Strategy::Patrol,
    motion: Motion::Rail,
    boss: false,
};

static DOG: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(48.0, 48.0),
    health: 2,
    speed: 1.5,
    points: 20,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 6.0,
    strategy: Strategy::Patrol,
    motion: Motion::Rail,
    boss: false,
};

static SQUIRREL: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(40.0, 40.0),
    health: 1,
    speed: 2.5,
    points: 15,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 4.0,
    strategy: Strategy::Patrol,
    motion: Motion::Rail,
    boss: false,
};

static BIG_CAT: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(80.0, 80.0),
    health: 3,
    speed: 0.8,
    points: 50,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 8.0,
    strategy: Strategy::Chase {
        range: 100.0,
        multiplier: 1.5,
    },
    motion: Motion::Rail,
    boss: false,
};

static BEAR: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(128.0, 128.0),
    health: 10,
    speed: 0.5,
    points: 200,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 12.0,
    strategy: Strategy::Charge {
        range: 150.0,
        cooldown: 120,
        speed: 4.0,
        duration: 60,
    },
    motion: Motion::Physics,
    boss: true,
};

static FISH: ArchetypeStats = ArchetypeStats {
    size: Vec2::new(48.0, 32.0),
    health: 1,
    speed: 1.0,
    points: 25,
    patrol_distance: DEFAULT_PATROL_DISTANCE,
    landing_offset: 0.0,
    strategy: Strategy::Float {
        amplitude: 20.0,
        phase_step: 0.1,
    },
    motion: Motion::Float,
    boss: false,
};

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Mouse,
        EnemyKind::Dog,
        EnemyKind::Squirrel,
        EnemyKind::BigCat,
        EnemyKind::Bear,
        EnemyKind::Fish,
    ];

    pub fn stats(self) -> &'static ArchetypeStats {
        match self {
            EnemyKind::Mouse => &MOUSE,
            EnemyKind::Dog => &DOG,
            EnemyKind::Squirrel => &SQUIRREL,
            EnemyKind::BigCat => &BIG_CAT,
            EnemyKind::Bear => &BEAR,
            EnemyKind::Fish => &FISH,
        }
    }

    /// Level-data tag, e.g. `"BigCat"`.
    pub fn tag(self) -> &'static str {
        match self {
            EnemyKind::Mouse => "Mouse",
            EnemyKind::Dog => "Dog",
            EnemyKind::Squirrel => "Squirrel",
            EnemyKind::BigCat => "BigCat",
            EnemyKind::Bear => "Bear",
            EnemyKind::Fish => "Fish",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Y at which this kind stands on a surface whose top is `surface_top`.
    pub fn rest_y(self, surface_top: f32) -> f32 {
        let stats = self.stats();
        surface_top - stats.size.y + stats.landing_offset
    }
}

/// Charger sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePhase {
    #[default]
    Normal,
    Charging,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    /// -1.0 (left) or +1.0 (right).
    pub direction: f32,
    pub speed: f32,
    pub points: u32,
    pub patrol_distance: f32,
    /// Spawn point. Anchors patrol bounds, rail height and float height.
    pub start: Vec2,
    /// Frames since the last charge started. Chasers count it every frame
    /// but never reset it.
    pub attack_timer: u32,
    pub charge: ChargePhase,
    /// Counted every frame; no archetype currently hops.
    pub jump_timer: u32,
    pub float_phase: f32,
    /// Frames left on the hit flash. 0 when inactive.
    pub damaged_flash: u32,
    pub anim: FrameCycle,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        let mut body = Body::new(pos, stats.size);
        body.on_ground = stats.motion == Motion::Rail;
        Self {
            id,
            kind,
            body,
            health: stats.health,
            max_health: stats.health,
            direction: 1.0,
            speed: stats.speed,
            points: stats.points,
            patrol_distance: stats.patrol_distance,
            start: pos,
            attack_timer: 0,
            charge: ChargePhase::Normal,
            jump_timer: 0,
            float_phase: 0.0,
            damaged_flash: 0,
            anim: FrameCycle::new(ANIMATION_PERIOD),
        }
    }

    // -- Builder pattern --

    pub fn with_patrol_distance(mut self, distance: f32) -> Self {
        self.patrol_distance = distance;
        self
    }

    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = if direction < 0.0 { -1.0 } else { 1.0 };
        self
    }

    pub fn stats(&self) -> &'static ArchetypeStats {
        self.kind.stats()
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.destroyed
    }

    /// Integrate according to the archetype's motion mode.
    pub fn integrate(&mut self, physics: &Physics) {
        match self.stats().motion {
            Motion::Physics => self.body.integrate(physics),
            Motion::Rail => {
                self.body.integrate(physics);
                self.body.pos.y = self.start.y;
                self.body.vel.y = 0.0;
            }
            // The float strategy already placed the body this frame.
            Motion::Float => {}
        }
    }

    /// Cosmetic counters that advance every frame regardless of strategy.
    pub fn tick_counters(&mut self) {
        self.anim.tick(2);
        self.damaged_flash = self.damaged_flash.saturating_sub(1);
        self.jump_timer = self.jump_timer.saturating_add(1);
    }

    /// Turn around after being stopped by a side face.
    pub fn bounce(&mut self, wall: Side) {
        match wall {
            Side::Left => self.direction = -1.0,
            Side::Right => self.direction = 1.0,
            Side::Top | Side::Bottom => {}
        }
    }

    /// Apply a hit. Returns true when this hit killed the enemy; the death
    /// burst is spawned into `fx` at the enemy's center.
    pub fn take_damage(&mut self, amount: i32, fx: &mut Effects) -> bool {
        if self.body.destroyed {
            return false;
        }
        self.health -= amount;
        self.damaged_flash = DAMAGE_FLASH_FRAMES;
        if self.health <= 0 {
            self.body.destroyed = true;
            fx.death_burst(self.body.center());
            return true;
        }
        false
    }

    /// Remaining health as a 0..=1 fraction.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health.max(0) as f32 / self.max_health as f32
    }

    /// Bosses always show a bar; others only once hurt.
    pub fn shows_health_bar(&self) -> bool {
        self.stats().boss || self.health < self.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_for_every_kind() {
        for kind in EnemyKind::ALL {
            assert_eq!(EnemyKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(EnemyKind::from_tag("Dragon"), None);
    }

    #[test]
    fn new_enemy_takes_stats_from_table() {
        let bear = Enemy::new(EntityId(1), EnemyKind::Bear, Vec2::new(10.0, 20.0));
        assert_eq!(bear.health, 10);
        assert_eq!(bear.body.size(), Vec2::splat(128.0));
        assert_eq!(bear.start, Vec2::new(10.0, 20.0));
        assert_eq!(bear.points, 200);
    }

    #[test]
    fn lethal_hit_spawns_five_particles_at_center() {
        let mut fx = Effects::new(3, 30);
        let mut mouse = Enemy::new(EntityId(1), EnemyKind::Mouse, Vec2::new(100.0, 200.0));
        assert_eq!(mouse.health, 1);
        assert!(mouse.take_damage(1, &mut fx));
        assert!(mouse.is_destroyed());
        assert_eq!(fx.len(), 5);
        for p in &fx.particles {
            assert_eq!(p.body.pos, Vec2::new(116.0, 216.0));
        }
    }

    #[test]
    fn non_lethal_hit_flashes() {
        let mut fx = Effects::new(3, 30);
        let mut dog = Enemy::new(EntityId(1), EnemyKind::Dog, Vec2::ZERO);
        assert!(!dog.take_damage(1, &mut fx));
        assert_eq!(dog.health, 1);
        assert_eq!(dog.damaged_flash, DAMAGE_FLASH_FRAMES);
        assert!(fx.is_empty());
        assert!(dog.shows_health_bar());
        dog.tick_counters();
        assert_eq!(dog.damaged_flash, DAMAGE_FLASH_FRAMES - 1);
    }

    #[test]
    fn destroyed_enemy_ignores_further_hits() {
        let mut fx = Effects::new(3, 30);
        let mut mouse = Enemy::new(EntityId(1), EnemyKind::Mouse, Vec2::ZERO);
        mouse.take_damage(1, &mut fx);
        assert!(!mouse.take_damage(1, &mut fx));
        assert_eq!(fx.len(), 5);
    }

    #[test]
    fn boss_exposes_health_fraction() {
        let mut fx = Effects::new(3, 30);
        let mut bear = Enemy::new(EntityId(1), EnemyKind::Bear, Vec2::ZERO);
        assert!(bear.shows_health_bar());
        bear.take_damage(3, &mut fx);
        assert!((bear.health_fraction() - 0.7).abs() < 1e-6);
        let mouse = Enemy::new(EntityId(2), EnemyKind::Mouse, Vec2::ZERO);
        assert!(!mouse.shows_health_bar());
    }

    #[test]
    fn rail_enemy_holds_its_height() {
        let physics = Physics::default();
        let mut dog = Enemy::new(EntityId(1), EnemyKind::Dog, Vec2::new(0.0, 500.0));
        for _ in 0..30 {
            dog.integrate(&physics);
            assert_eq!(dog.body.pos.y, 500.0);
            assert_eq!(dog.body.vel.y, 0.0);
        }
    }

    #[test]
    fn physics_enemy_falls() {
        let physics = Physics::default();
        let mut bear = Enemy::new(EntityId(1), EnemyKind::Bear, Vec2::new(0.0, 0.0));
        bear.integrate(&physics);
        bear.integrate(&physics);
        assert!((bear.body.vel.y - 2.0 * physics.gravity).abs() < 1e-5);
    }

    #[test]
    fn wall_bounce_turns_around() {
        let mut mouse = Enemy::new(EntityId(1), EnemyKind::Mouse, Vec2::ZERO);
        mouse.bounce(Side::Left);
        assert_eq!(mouse.direction, -1.0);
        mouse.bounce(Side::Right);
        assert_eq!(mouse.direction, 1.0);
    }

    #[test]
    fn rest_y_applies_landing_offset() {
        assert_eq!(EnemyKind::Mouse.rest_y(536.0), 536.0 - 32.0 + 4.0);
        assert_eq!(EnemyKind::Bear.rest_y(536.0), 536.0 - 128.0 + 12.0);
    }
}
