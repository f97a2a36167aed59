use crate::core::world::World;
use crate::renderer::camera::Camera;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::renderer::snapshot::{EntityView, FrameSnapshot, Hud, ViewKind};

/// Capture everything on screen, back to front. Off-screen entities are
/// culled; the player is left out on the hidden half of a blink.
pub fn snapshot(world: &World, camera: &Camera) -> FrameSnapshot {
    let mut views = Vec::with_capacity(128);

    for platform in &world.platforms {
        if camera.is_visible(platform.rect()) {
            views.push(EntityView::new(ViewKind::Platform(platform.surface()), *platform.rect()));
        }
    }

    for item in world.collectibles.iter().filter(|c| !c.body.destroyed) {
        let rect = item.body.rect();
        if camera.is_visible(&rect) {
            views.push(EntityView::new(ViewKind::Item(item.kind), rect));
        }
    }

    for enemy in world.enemies.iter().filter(|e| !e.is_destroyed()) {
        let rect = enemy.body.rect();
        if !camera.is_visible(&rect) {
            continue;
        }
        let mut view = EntityView::new(ViewKind::Enemy(enemy.kind), rect);
        view.frame = enemy.anim.frame() as u32;
        view.flip = enemy.direction < 0.0;
        view.flash = enemy.damaged_flash > 0;
        if enemy.shows_health_bar() {
            view.health_bar = Some(enemy.health_fraction());
        }
        views.push(view);
    }

    let player = &world.player;
    if player.visible() {
        let mut view = EntityView::new(ViewKind::Player(player.state), player.body.rect());
        view.frame = player.anim.frame() as u32;
        view.flip = !player.facing_right;
        if player.attacking {
            view.attack = Some(player.attack_kind);
        }
        views.push(view);
    }

    for particle in &world.effects.particles {
        let rect = particle.body.rect();
        if !camera.is_visible(&rect) {
            continue;
        }
        let mut view = EntityView::new(ViewKind::Particle, rect);
        view.alpha = particle.alpha();
        view.hue = Some(particle.hue);
        views.push(view);
    }

    let boss = world
        .enemies
        .iter()
        .find(|e| e.stats().boss && !e.is_destroyed())
        .map(|e| e.health_fraction());

    FrameSnapshot {
        frame: world.frame(),
        camera: camera.pos,
        hud: Hud {
            health: player.health,
            max_health: player.max_health,
            score: world.score(),
            status: world.status(),
            level: world.level().map(|l| l.name.clone()).unwrap_or_default(),
            enemies_left: world.enemies.iter().filter(|e| !e.is_destroyed()).count(),
            boss,
        },
        views,
    }
}

/// Pack a snapshot into the flat instance buffer. Particles go last, after
/// `effects_split`.
pub fn build_render_buffer(frame: &FrameSnapshot, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut sprites: Vec<RenderInstance> = Vec::with_capacity(frame.views.len());
    let mut particles: Vec<RenderInstance> = Vec::new();

    for view in &frame.views {
        let mut flags = 0;
        if view.flip {
            flags |= RenderInstance::FLAG_FLIP;
        }
        if view.flash {
            flags |= RenderInstance::FLAG_FLASH;
        }
        if view.health_bar.is_some() {
            flags |= RenderInstance::FLAG_HEALTH_BAR;
        }
        let instance = RenderInstance {
            x: view.rect.pos.x,
            y: view.rect.pos.y,
            width: view.rect.size.x,
            height: view.rect.size.y,
            sprite: view.kind.sprite_id(),
            frame: view.hue.unwrap_or(view.frame as f32),
            alpha: view.alpha,
            flags: flags as f32,
        };
        match view.kind {
            ViewKind::Particle => particles.push(instance),
            _ => sprites.push(instance),
        }
    }

    let split = sprites.len() as u32;
    for inst in sprites {
        buffer.push(inst);
    }
    buffer.set_effects_split(split);
    for inst in particles {
        buffer.push(inst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::WorldConfig;
    use crate::components::enemy::EnemyKind;
    use crate::components::platform::{Platform, SurfaceKind};
    use glam::Vec2;

    fn small_world() -> World {
        let mut world = World::new(WorldConfig::default());
        world.add_platform(Platform::tile(0, 536.0, SurfaceKind::Slate));
        world.add_platform(Platform::tile(40, 536.0, SurfaceKind::Brick));
        world.spawn_enemy(EnemyKind::Bear, Vec2::new(300.0, 420.0));
        world
    }

    #[test]
    fn snapshot_culls_and_orders_views() {
        let world = small_world();
        let camera = Camera::new(800.0, 600.0);
        let frame = snapshot(&world, &camera);
        // The far tile at x=2560 is off screen.
        assert_eq!(frame.views.len(), 3);
        assert!(matches!(frame.views[0].kind, ViewKind::Platform(SurfaceKind::Slate)));
        assert!(matches!(frame.views[1].kind, ViewKind::Enemy(EnemyKind::Bear)));
        assert!(matches!(frame.views[2].kind, ViewKind::Player(_)));
        assert_eq!(frame.hud.boss, Some(1.0));
        assert_eq!(frame.views[1].health_bar, Some(1.0));
        assert_eq!(frame.hud.health, 6);
    }

    #[test]
    fn blinking_player_is_hidden_on_alternate_windows() {
        let mut world = small_world();
        world.player.take_damage();
        let camera = Camera::new(800.0, 600.0);
        let mut shown = Vec::new();
        for _ in 0..20 {
            world.player.tick_timers();
            let frame = snapshot(&world, &camera);
            shown.push(frame.views.iter().any(|v| matches!(v.kind, ViewKind::Player(_))));
        }
        assert!(shown.contains(&true));
        assert!(shown.contains(&false));
    }

    #[test]
    fn particles_follow_the_split() {
        let mut world = small_world();
        world.effects.burst(Vec2::new(100.0, 100.0), 4);
        let camera = Camera::new(800.0, 600.0);
        let frame = snapshot(&world, &camera);
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&frame, &mut buffer);
        assert_eq!(buffer.instance_count(), 7);
        assert_eq!(buffer.effects_split, 3);
        let first_particle = buffer.instances[3];
        assert_eq!(first_particle.sprite, ViewKind::Particle.sprite_id());
        assert!((15.0..75.0).contains(&first_particle.frame));
    }

    #[test]
    fn off_screen_particles_are_culled() {
        let mut world = small_world();
        world.effects.burst(Vec2::new(3000.0, 100.0), 4);
        world.effects.burst(Vec2::new(400.0, 100.0), 2);
        let frame = snapshot(&world, &Camera::new(800.0, 600.0));
        let particles = frame
            .views
            .iter()
            .filter(|v| matches!(v.kind, ViewKind::Particle))
            .count();
        assert_eq!(particles, 2);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let world = small_world();
        let frame = snapshot(&world, &Camera::new(800.0, 600.0));
        let json: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();
        assert_eq!(json["hud"]["score"], 0);
        assert_eq!(json["hud"]["status"], "Playing");
        assert_eq!(json["views"].as_array().unwrap().len(), 3);
    }
}
