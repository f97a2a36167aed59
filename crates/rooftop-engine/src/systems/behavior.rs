//! Per-archetype velocity strategies, run once per frame before integration.

use crate::components::enemy::{ChargePhase, Enemy, Strategy, PATROL_MARGIN};

/// Set the enemy's velocity for this frame from its archetype strategy.
/// `player_x` is the player's left edge.
pub fn drive(enemy: &mut Enemy, player_x: f32) {
    if enemy.is_destroyed() {
        return;
    }
    match enemy.stats().strategy {
        Strategy::Patrol => patrol(enemy),
        Strategy::Chase { range, multiplier } => chase(enemy, player_x, range, multiplier),
        Strategy::Charge {
            range,
            cooldown,
            speed,
            duration,
        } => charge(enemy, player_x, range, cooldown, speed, duration),
        Strategy::Float {
            amplitude,
            phase_step,
        } => float(enemy, amplitude, phase_step),
    }
    enemy.tick_counters();
}

fn toward(enemy: &Enemy, player_x: f32) -> f32 {
    if player_x > enemy.body.pos.x {
        1.0
    } else {
        -1.0
    }
}

/// Walk between `start.x ± patrol_distance`, turning `PATROL_MARGIN` short
/// of either bound.
pub fn patrol(enemy: &mut Enemy) {
    let x = enemy.body.pos.x;
    let reach = enemy.patrol_distance - PATROL_MARGIN;
    if enemy.direction > 0.0 && x >= enemy.start.x + reach {
        enemy.direction = -1.0;
    } else if enemy.direction < 0.0 && x <= enemy.start.x - reach {
        enemy.direction = 1.0;
    }
    enemy.body.vel.x = enemy.speed * enemy.direction;
}

pub fn chase(enemy: &mut Enemy, player_x: f32, range: f32, multiplier: f32) {
    enemy.attack_timer = enemy.attack_timer.saturating_add(1);
    if (player_x - enemy.body.pos.x).abs() < range {
        enemy.direction = toward(enemy, player_x);
        enemy.body.vel.x = enemy.speed * enemy.direction * multiplier;
    } else {
        patrol(enemy);
    }
}

pub fn charge(
    enemy: &mut Enemy,
    player_x: f32,
    range: f32,
    cooldown: u32,
    charge_speed: f32,
    duration: u32,
) {
    enemy.attack_timer = enemy.attack_timer.saturating_add(1);
    let in_range = (player_x - enemy.body.pos.x).abs() < range;
    if in_range && enemy.attack_timer >= cooldown {
        enemy.charge = ChargePhase::Charging;
        enemy.direction = toward(enemy, player_x);
        enemy.attack_timer = 0;
    }

    match enemy.charge {
        ChargePhase::Charging => {
            enemy.body.vel.x = charge_speed * enemy.direction;
            if enemy.attack_timer > duration {
                enemy.charge = ChargePhase::Normal;
            }
        }
        ChargePhase::Normal => {
            enemy.body.vel.x = enemy.speed * enemy.direction;
        }
    }
}

/// Floaters move themselves: no integration, no gravity. Their bounds are
/// the raw patrol distance with no margin.
pub fn float(enemy: &mut Enemy, amplitude: f32, phase_step: f32) {
    enemy.float_phase += phase_step;
    enemy.body.pos.y = enemy.start.y + enemy.float_phase.sin() * amplitude;

    // Only turn when heading further out, so a floater never jitters on a bound.
    let x = enemy.body.pos.x;
    if enemy.direction > 0.0 && x > enemy.start.x + enemy.patrol_distance {
        enemy.direction = -1.0;
    } else if enemy.direction < 0.0 && x < enemy.start.x - enemy.patrol_distance {
        enemy.direction = 1.0;
    }
    enemy.body.vel.x = enemy.speed * enemy.direction;
    enemy.body.pos.x += enemy.body.vel.x;
}
