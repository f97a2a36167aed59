//! The simulation world: owns every entity and advances them one fixed frame
//! at a time.

use glam::Vec2;

use crate::api::config::{Physics, WorldConfig};
use crate::api::types::{EntityId, GameStatus, WorldEvent};
use crate::assets::level::Level;
use crate::components::collectible::Collectible;
use crate::components::enemy::{Enemy, EnemyKind, Motion};
use crate::components::platform::Platform;
use crate::components::player::Player;
use crate::core::body::Rect;
use crate::core::collision::{overlaps, settle};
use crate::input::keys::InputSnapshot;
use crate::systems::behavior;
use crate::systems::effects::Effects;

pub struct World {
    config: WorldConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    pub effects: Effects,
    score: u32,
    status: GameStatus,
    frame: u64,
    events: Vec<WorldEvent>,
    next_id: u32,
    start: Vec2,
    level: Option<Level>,
    /// Enemies and items of a hand-built world as they stood at its first
    /// step. `restart` puts them back when no level is loaded.
    opening: Option<(Vec<Enemy>, Vec<Collectible>)>,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let start = config.player.start;
        let effects = Effects::new(config.seed, config.particle_life)
            .with_bursts(config.death_burst, config.pickup_burst);
        Self {
            player: Player::new(start, &config.player),
            enemies: Vec::new(),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            effects,
            score: 0,
            status: GameStatus::Playing,
            frame: 0,
            events: Vec::new(),
            next_id: 1,
            start,
            level: None,
            opening: None,
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn physics(&self) -> &Physics {
        &self.config.physics
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Steps taken since the level was loaded.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Where the player spawns and respawns.
    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    // -- Level setup --

    pub fn set_player_start(&mut self, start: Vec2) {
        self.start = start;
        self.player.reset(start);
    }

    pub fn add_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    pub fn add_collectible(&mut self, item: Collectible) {
        self.collectibles.push(item);
    }

    fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an enemy with a fresh id. Returns it for further tweaking.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2) -> &mut Enemy {
        let id = self.next_id();
        self.enemies.push(Enemy::new(id, kind, pos));
        let last = self.enemies.len() - 1;
        &mut self.enemies[last]
    }

    /// Replace the world's contents with `level`. Score carries over.
    pub fn load_level(&mut self, level: &Level) {
        self.enemies.clear();
        self.platforms.clear();
        self.collectibles.clear();
        self.effects.clear();
        self.events.clear();
        self.next_id = 1;
        self.frame = 0;
        self.status = GameStatus::Playing;
        self.opening = None;

        self.platforms.extend(level.platforms());
        for spawn in level.resolve_enemies(&self.config.physics) {
            let mut enemy = Enemy::new(self.next_id(), spawn.kind, spawn.pos);
            if let Some(d) = spawn.patrol_distance {
                enemy = enemy.with_patrol_distance(d);
            }
            if let Some(dir) = spawn.direction {
                enemy = enemy.with_direction(dir);
            }
            self.enemies.push(enemy);
        }
        for item in &level.items {
            self.collectibles
                .push(Collectible::new(item.kind, Vec2::new(item.x, item.y)));
        }

        self.start = level.player_start.unwrap_or(self.config.player.start);
        self.player.reset(self.start);
        log::info!(
            "Level '{}' loaded: {} platforms, {} enemies, {} items",
            level.name,
            self.platforms.len(),
            self.enemies.len(),
            self.collectibles.len()
        );
        self.level = Some(level.clone());
    }

    /// Reload the current level from scratch and zero the score. A world
    /// built by hand gets back the enemies and items it had at its first step.
    pub fn restart(&mut self) {
        self.score = 0;
        if let Some(level) = self.level.take() {
            self.load_level(&level);
            return;
        }
        if let Some((enemies, collectibles)) = &self.opening {
            self.enemies = enemies.clone();
            self.collectibles = collectibles.clone();
        }
        self.status = GameStatus::Playing;
        self.frame = 0;
        self.effects.clear();
        self.events.clear();
        self.player.reset(self.start);
    }

    /// True once every enemy has been removed.
    pub fn is_cleared(&self) -> bool {
        self.enemies.iter().all(|e| e.is_destroyed())
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// Take this frame's events. The host calls this once per frame.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Simulation --

    /// Advance one fixed frame. Does nothing once the game is over.
    pub fn step(&mut self, input: &InputSnapshot) {
        if self.status != GameStatus::Playing {
            return;
        }
        if self.frame == 0 && self.level.is_none() && self.opening.is_none() {
            self.opening = Some((self.enemies.clone(), self.collectibles.clone()));
        }
        self.frame += 1;
        let physics = self.config.physics;

        self.player.apply_input(input);

        let player_x = self.player.body.pos.x;
        for enemy in &mut self.enemies {
            behavior::drive(enemy, player_x);
        }

        self.player.integrate(&physics);
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_destroyed()) {
            enemy.integrate(&physics);
        }
        self.effects.tick(&physics);
        for item in &mut self.collectibles {
            item.tick();
        }
        self.enforce_bounds(&physics);

        self.collide_player_with_platforms();
        self.collide_enemies_with_platforms();
        self.resolve_combat();
        self.collect_items();

        self.enemies.retain(|e| !e.is_destroyed());
        self.collectibles.retain(|c| !c.body.destroyed);
        self.effects.purge();
    }

    fn enforce_bounds(&mut self, physics: &Physics) {
        self.player.clamp_left();
        if self.player.body.below_world(physics) {
            self.hurt_player();
            self.player.respawn(self.start);
            self.events.push(WorldEvent::PlayerRespawned);
            log::debug!("Player fell out of the world, respawned at {:?}", self.start);
        }
        for enemy in &mut self.enemies {
            if !enemy.is_destroyed() && enemy.body.below_world(physics) {
                enemy.body.destroyed = true;
                log::debug!("{:?} {:?} fell out of the world", enemy.kind, enemy.id);
            }
        }
    }

    fn collide_player_with_platforms(&mut self) {
        let bands = &self.config.landing_bands;
        settle(
            &mut self.player.body,
            self.platforms.iter().map(Platform::rect),
            |rect: &Rect| bands.offset_for(rect.top()),
        );
    }

    fn collide_enemies_with_platforms(&mut self) {
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_destroyed()) {
            let stats = enemy.stats();
            if stats.motion == Motion::Float {
                continue;
            }
            let offset = stats.landing_offset;
            let report = settle(&mut enemy.body, self.platforms.iter().map(Platform::rect), |_| offset);
            if let Some(wall) = report.wall {
                enemy.bounce(wall);
            }
        }
    }

    /// Player against every live enemy: an active swing damages each enemy
    /// once, any other touch hurts the player.
    fn resolve_combat(&mut self) {
        let player_rect = self.player.body.rect();
        let mut touched = false;
        for enemy in self.enemies.iter_mut().filter(|e| !e.is_destroyed()) {
            if !overlaps(&player_rect, &enemy.body.rect()) {
                continue;
            }
            if !self.player.attacking {
                touched = true;
                continue;
            }
            if !self.player.attacked.insert(enemy.id) {
                continue;
            }
            self.score += enemy.points;
            self.events.push(WorldEvent::EnemyHit {
                id: enemy.id,
                points: enemy.points,
            });
            if enemy.take_damage(1, &mut self.effects) {
                let center = enemy.body.center();
                self.events.push(WorldEvent::EnemyDefeated {
                    id: enemy.id,
                    x: center.x,
                    y: center.y,
                });
                log::debug!("{:?} {:?} defeated", enemy.kind, enemy.id);
            }
        }
        if touched {
            self.hurt_player();
        }
    }

    fn collect_items(&mut self) {
        let player_rect = self.player.body.rect();
        for item in self.collectibles.iter_mut().filter(|c| !c.body.destroyed) {
            if !overlaps(&player_rect, &item.body.rect()) {
                continue;
            }
            item.body.destroyed = true;
            let (heal, score) = (item.kind.heal(), item.kind.score());
            if heal > 0 {
                self.player.heal(heal);
            }
            self.score += score;
            self.effects.pickup_burst(item.body.center());
            self.events.push(WorldEvent::ItemCollected { score, heal });
        }
    }

    /// One damage tick, honoring invulnerability. Ends the game at zero health.
    fn hurt_player(&mut self) {
        if self.player.invulnerable || self.status != GameStatus::Playing {
            return;
        }
        let dead = self.player.take_damage();
        self.events.push(WorldEvent::PlayerHurt {
            health: self.player.health,
        });
        if dead {
            self.status = GameStatus::Over;
            self.events.push(WorldEvent::GameOver);
            log::info!("Game over at frame {} with score {}", self.frame, self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::collectible::CollectibleKind;
    use crate::components::platform::SurfaceKind;

    const GROUND: f32 = 536.0;

    fn world_with_ground() -> World {
        let mut world = World::new(WorldConfig::default());
        for col in 0..20 {
            world.add_platform(Platform::tile(col, GROUND, SurfaceKind::Slate));
        }
        world
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn attack() -> InputSnapshot {
        InputSnapshot {
            attack_front: true,
            ..Default::default()
        }
    }

    /// Put the player on the ground at `x`.
    fn stand_player(world: &mut World, x: f32) {
        world.player.body.pos = Vec2::new(x, GROUND - 64.0 + 8.0);
        world.player.body.vel = Vec2::ZERO;
        world.player.body.on_ground = true;
    }

    #[test]
    fn player_settles_on_ground() {
        let mut world = world_with_ground();
        for _ in 0..120 {
            world.step(&idle());
        }
        assert!(world.player.body.on_ground);
        assert_eq!(world.player.body.pos.y, GROUND - 64.0 + 8.0);
        assert_eq!(world.player.state, crate::components::player::PlayerState::Idle);
    }

    #[test]
    fn one_swing_hits_each_enemy_once() {
        let mut world = world_with_ground();
        stand_player(&mut world, 200.0);
        let rest = EnemyKind::Bear.rest_y(GROUND);
        let id = world.spawn_enemy(EnemyKind::Bear, Vec2::new(220.0, rest)).id;

        world.step(&attack());
        for _ in 0..10 {
            world.step(&attack());
        }
        let bear = world.enemies.iter().find(|e| e.id == id).unwrap();
        assert_eq!(bear.health, 9);
        assert_eq!(world.score(), 200);
        let hits = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, WorldEvent::EnemyHit { .. }))
            .count();
        assert_eq!(hits, 1);
        // Attacking the whole time, so contact never hurt the player.
        assert_eq!(world.player.health, 6);
    }

    #[test]
    fn next_swing_can_hit_again() {
        let mut world = world_with_ground();
        stand_player(&mut world, 200.0);
        let rest = EnemyKind::Bear.rest_y(GROUND);
        world.spawn_enemy(EnemyKind::Bear, Vec2::new(220.0, rest));

        // Holding attack does not restart a swing; a new one starts once it ends.
        world.step(&attack());
        for _ in 0..19 {
            world.step(&attack());
        }
        assert!(!world.player.attacking);
        world.step(&attack());
        assert_eq!(world.enemies[0].health, 8);
    }

    #[test]
    fn contact_damage_respects_invulnerability() {
        let mut world = world_with_ground();
        stand_player(&mut world, 200.0);
        let rest = EnemyKind::Bear.rest_y(GROUND);
        world.spawn_enemy(EnemyKind::Bear, Vec2::new(220.0, rest));

        world.step(&idle());
        assert_eq!(world.player.health, 5);
        assert!(world.player.invulnerable);

        // Still overlapping for the next 59 frames: no further damage.
        for _ in 0..59 {
            stand_player(&mut world, 200.0);
            world.step(&idle());
            assert_eq!(world.player.health, 5);
        }
        stand_player(&mut world, 200.0);
        world.step(&idle());
        assert_eq!(world.player.health, 4);
    }

    #[test]
    fn killing_blow_bursts_at_enemy_center_and_removes_it() {
        let mut world = world_with_ground();
        stand_player(&mut world, 200.0);
        let rest = EnemyKind::Mouse.rest_y(GROUND);
        world.spawn_enemy(EnemyKind::Mouse, Vec2::new(230.0, rest));

        world.step(&attack());
        assert!(world.enemies.is_empty());
        assert!(world.is_cleared());
        assert_eq!(world.effects.len(), 5);
        let defeated = world
            .events()
            .iter()
            .find_map(|e| match *e {
                WorldEvent::EnemyDefeated { x, y, .. } => Some(Vec2::new(x, y)),
                _ => None,
            })
            .unwrap();
        // Particles tick before combat, so the fresh burst has not moved.
        for p in &world.effects.particles {
            assert_eq!(p.body.pos, defeated);
        }
        assert_eq!(world.score(), 10);
    }

    #[test]
    fn falling_out_costs_health_and_respawns() {
        let mut world = World::new(WorldConfig::default());
        world.player.body.pos = Vec2::new(300.0, 599.0);
        world.player.body.vel = Vec2::new(0.0, 5.0);
        world.step(&idle());
        assert_eq!(world.player.health, 5);
        assert_eq!(world.player.body.pos, Vec2::new(100.0, 400.0));
        assert_eq!(world.player.body.vel, Vec2::ZERO);
        assert!(world.events().contains(&WorldEvent::PlayerRespawned));
    }

    #[test]
    fn health_reaching_zero_ends_the_game() {
        let mut world = World::new(WorldConfig::default());
        world.player.health = 1;
        world.player.body.pos = Vec2::new(300.0, 599.0);
        world.player.body.vel = Vec2::new(0.0, 5.0);
        world.step(&idle());
        assert_eq!(world.status(), GameStatus::Over);
        assert!(world.events().contains(&WorldEvent::GameOver));

        let frame = world.frame();
        let pos = world.player.body.pos;
        world.step(&idle());
        assert_eq!(world.frame(), frame);
        assert_eq!(world.player.body.pos, pos);
    }

    #[test]
    fn enemy_falling_out_is_removed_without_burst() {
        let mut world = World::new(WorldConfig::default());
        world.spawn_enemy(EnemyKind::Bear, Vec2::new(300.0, 590.0));
        for _ in 0..10 {
            world.step(&idle());
        }
        assert!(world.enemies.is_empty());
        assert!(world.effects.is_empty());
    }

    #[test]
    fn rail_enemy_patrols_on_the_ground() {
        let mut world = world_with_ground();
        let rest = EnemyKind::Dog.rest_y(GROUND);
        world.spawn_enemy(EnemyKind::Dog, Vec2::new(600.0, rest));
        world.player.body.pos.x = 0.0;
        for _ in 0..300 {
            world.step(&idle());
            let dog = &world.enemies[0];
            assert_eq!(dog.body.pos.y, rest);
            assert!(dog.body.pos.x > 495.0 && dog.body.pos.x < 705.0);
        }
    }

    #[test]
    fn wall_turns_a_patroller_around() {
        let mut world = world_with_ground();
        // A one-tile step at column 10 (x 640..704), rising above the ground row.
        world.add_platform(Platform::tile(10, GROUND - 40.0, SurfaceKind::Brick));
        let rest = EnemyKind::Mouse.rest_y(GROUND);
        let id = world.spawn_enemy(EnemyKind::Mouse, Vec2::new(600.0, rest)).id;
        world.player.body.pos.x = 0.0;
        let mut bounced = false;
        for _ in 0..60 {
            world.step(&idle());
            let mouse = world.enemies.iter().find(|e| e.id == id).unwrap();
            assert!(mouse.body.rect().right() <= 640.0);
            if mouse.direction < 0.0 {
                bounced = true;
            }
        }
        assert!(bounced);
    }

    #[test]
    fn floater_ignores_platforms() {
        let mut world = world_with_ground();
        world.spawn_enemy(EnemyKind::Fish, Vec2::new(300.0, GROUND - 10.0));
        world.player.body.pos.x = 900.0;
        for _ in 0..100 {
            world.step(&idle());
            assert!(world.enemies[0].body.pos.y >= GROUND - 30.0 - 1e-3);
            assert!(!world.enemies[0].body.on_ground);
        }
    }

    #[test]
    fn pickup_heals_scores_and_disappears() {
        let mut world = world_with_ground();
        stand_player(&mut world, 200.0);
        world.player.health = 4;
        world.add_collectible(Collectible::new(CollectibleKind::Fish, Vec2::new(210.0, 500.0)));
        world.step(&idle());
        assert!(world.collectibles.is_empty());
        assert_eq!(world.player.health, 5);
        assert_eq!(world.score(), 50);
        assert_eq!(world.effects.len(), 3);
    }

    #[test]
    fn load_level_and_restart() {
        let json = r#"{
            "name": "yard",
            "player_start": [64.0, 300.0],
            "platforms": [ { "start_col": 0, "y": 536.0, "count": 10 } ],
            "enemies": [
                { "kind": "Mouse", "x": 400.0 },
                { "kind": "Unicorn", "x": 500.0 }
            ],
            "items": [ { "kind": "coin", "x": 600.0, "y": 480.0 } ]
        }"#;
        let level = Level::from_json(json).unwrap();
        let mut world = World::new(WorldConfig::default());
        world.load_level(&level);
        assert_eq!(world.platforms.len(), 10);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.collectibles.len(), 1);
        assert_eq!(world.player.body.pos, Vec2::new(64.0, 300.0));
        assert!(!world.is_cleared());

        for _ in 0..30 {
            world.step(&idle());
        }
        world.score = 70;
        world.player.health = 2;
        world.restart();
        assert_eq!(world.score(), 0);
        assert_eq!(world.frame(), 0);
        assert_eq!(world.player.health, 6);
        assert_eq!(world.player.body.pos, Vec2::new(64.0, 300.0));
        assert_eq!(world.enemies[0].body.pos.x, 400.0);
    }

    #[test]
    fn level_overrides_patrol_and_heading() {
        let json = r#"{
            "name": "alley",
            "platforms": [ { "start_col": 0, "y": 536.0, "count": 20 } ],
            "enemies": [ { "kind": "Dog", "x": 600.0, "patrol_distance": 40.0, "direction": -3.0 } ]
        }"#;
        let mut world = World::new(WorldConfig::default());
        world.load_level(&Level::from_json(json).unwrap());
        let dog = &world.enemies[0];
        assert_eq!(dog.patrol_distance, 40.0);
        assert_eq!(dog.direction, -1.0);

        world.player.body.pos.x = 0.0;
        for _ in 0..200 {
            world.step(&idle());
            let x = world.enemies[0].body.pos.x;
            assert!(x > 555.0 && x < 645.0, "dog wandered to {}", x);
        }
    }

    #[test]
    fn restart_restores_hand_built_roster() {
        let mut world = world_with_ground();
        world.set_player_start(Vec2::new(40.0, 300.0));
        let rest = EnemyKind::Dog.rest_y(GROUND);
        world.spawn_enemy(EnemyKind::Dog, Vec2::new(600.0, rest));
        world.add_collectible(Collectible::new(CollectibleKind::Coin, Vec2::new(900.0, 480.0)));

        for _ in 0..30 {
            world.step(&idle());
        }
        world.enemies[0].health = 1;
        world.collectibles.clear();
        world.restart();

        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].health, 2);
        assert_eq!(world.enemies[0].body.pos, Vec2::new(600.0, rest));
        assert_eq!(world.collectibles.len(), 1);
        assert_eq!(world.player.body.pos, Vec2::new(40.0, 300.0));
        assert_eq!(world.frame(), 0);
    }

    #[test]
    fn boss_stays_on_the_rooftops_map() {
        let config = WorldConfig::default();
        let mut world = World::new(config.clone());
        let level = Level::rooftops(&config);
        world.load_level(&level);
        let bear_id = world
            .enemies
            .iter()
            .find(|e| e.kind == EnemyKind::Bear)
            .map(|e| e.id)
            .unwrap();

        let mut turned = false;
        for _ in 0..900 {
            world.step(&idle());
            let bear = world
                .enemies
                .iter()
                .find(|e| e.id == bear_id)
                .expect("bear left the map");
            assert!(bear.body.rect().right() <= level.width() - Platform::TILE);
            turned |= bear.direction < 0.0;
        }
        assert!(turned);
        assert!(!world.is_cleared());
    }

    #[test]
    fn rooftops_level_runs_without_losing_the_player() {
        let config = WorldConfig::default();
        let mut world = World::new(config.clone());
        world.load_level(&Level::rooftops(&config));
        let run = InputSnapshot {
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            world.step(&run);
        }
        assert!(world.player.body.pos.x > 100.0);
        assert!(world.player.body.pos.y <= config.physics.world_height);
    }
}
