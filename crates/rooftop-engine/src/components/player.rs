//! The player-controlled cat.

use std::collections::HashSet;

use glam::Vec2;
use serde::Serialize;

use crate::api::config::{Physics, PlayerTuning};
use crate::api::types::EntityId;
use crate::components::animation::FrameCycle;
use crate::core::body::Body;
use crate::input::keys::InputSnapshot;

/// Frames between animation frame changes, for every player state.
const ANIMATION_PERIOD: u32 = 30;
/// Length of one visible/hidden window while blinking.
const BLINK_WINDOW: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerState {
    Idle,
    Running,
    JumpingUp,
    Falling,
    Attacking,
}

impl PlayerState {
    /// Frames in this state's animation sequence.
    pub fn frame_count(self) -> usize {
        match self {
            PlayerState::Idle => 4,
            PlayerState::Running => 2,
            PlayerState::JumpingUp | PlayerState::Falling | PlayerState::Attacking => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttackKind {
    Front,
    Back,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub facing_right: bool,
    pub attacking: bool,
    pub attack_timer: u32,
    pub attack_kind: AttackKind,
    /// Enemies already hit by the current swing.
    pub attacked: HashSet<EntityId>,
    pub invulnerable: bool,
    pub invulnerability_timer: u32,
    pub state: PlayerState,
    pub anim: FrameCycle,
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::new(pos, tuning.size),
            health: tuning.max_health,
            max_health: tuning.max_health,
            facing_right: true,
            attacking: false,
            attack_timer: 0,
            attack_kind: AttackKind::Front,
            attacked: HashSet::new(),
            invulnerable: false,
            invulnerability_timer: 0,
            state: PlayerState::Idle,
            anim: FrameCycle::new(ANIMATION_PERIOD),
            tuning: *tuning,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Translate this frame's held keys into velocity, attacks and state,
    /// then count the timers down once.
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        let moving = input.left || input.right;
        if input.left {
            self.body.vel.x = -self.tuning.speed;
            self.facing_right = false;
        } else if input.right {
            self.body.vel.x = self.tuning.speed;
            self.facing_right = true;
        }

        if input.jump && self.body.on_ground {
            self.body.vel.y = -self.tuning.jump_power;
            self.body.on_ground = false;
        }

        if !self.attacking {
            if input.attack_front {
                self.start_attack(AttackKind::Front);
            } else if input.attack_back {
                self.start_attack(AttackKind::Back);
            }
        }

        self.tick_timers();
        self.update_state(moving);
    }

    fn start_attack(&mut self, kind: AttackKind) {
        self.attacking = true;
        self.attack_timer = self.tuning.attack_duration;
        self.attack_kind = kind;
        self.attacked.clear();
    }

    pub fn tick_timers(&mut self) {
        if self.attacking {
            self.attack_timer = self.attack_timer.saturating_sub(1);
            if self.attack_timer == 0 {
                self.attacking = false;
            }
        }
        if self.invulnerable {
            self.invulnerability_timer = self.invulnerability_timer.saturating_sub(1);
            if self.invulnerability_timer == 0 {
                self.invulnerable = false;
            }
        }
    }

    fn update_state(&mut self, moving: bool) {
        let next = if self.attacking {
            PlayerState::Attacking
        } else if !self.body.on_ground {
            if self.body.vel.y < 0.0 {
                PlayerState::JumpingUp
            } else {
                PlayerState::Falling
            }
        } else if moving {
            PlayerState::Running
        } else {
            PlayerState::Idle
        };
        if next != self.state {
            self.state = next;
            self.anim.restart();
        }
        self.anim.tick(self.state.frame_count());
    }

    /// Lose one health point unless invulnerable. Returns true when health
    /// reached zero.
    pub fn take_damage(&mut self) -> bool {
        if self.invulnerable {
            return false;
        }
        self.health = (self.health - 1).max(0);
        self.invulnerable = true;
        self.invulnerability_timer = self.tuning.invulnerability_duration;
        self.health == 0
    }

    /// Restore health up to the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Put the player back at `start` with no velocity.
    pub fn respawn(&mut self, start: Vec2) {
        self.body.pos = start;
        self.body.vel = Vec2::ZERO;
        self.body.on_ground = false;
    }

    /// Full reset for a new level or a restart.
    pub fn reset(&mut self, start: Vec2) {
        let tuning = self.tuning;
        *self = Self::new(start, &tuning);
    }

    /// Keep the player out of negative X.
    pub fn clamp_left(&mut self) {
        if self.body.pos.x < 0.0 {
            self.body.pos.x = 0.0;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Whether the sprite is drawn this frame. Hidden on alternate windows
    /// while invulnerable.
    pub fn visible(&self) -> bool {
        !self.invulnerable || (self.invulnerability_timer / BLINK_WINDOW) % 2 == 0
    }

    pub fn integrate(&mut self, physics: &Physics) {
        self.body.integrate(physics);
    }
}
