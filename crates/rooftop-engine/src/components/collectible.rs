use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::body::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    Fish,
    Heart,
    Coin,
}

impl CollectibleKind {
    /// Health restored on pickup.
    pub fn heal(self) -> i32 {
        match self {
            CollectibleKind::Fish | CollectibleKind::Heart => 1,
            CollectibleKind::Coin => 0,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            CollectibleKind::Fish => 50,
            CollectibleKind::Heart => 0,
            CollectibleKind::Coin => 100,
        }
    }
}

/// A floating pickup. Consumed on first contact with the player.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub body: Body,
    timer: u32,
}

impl Collectible {
    pub const SIZE: f32 = 32.0;

    pub fn new(kind: CollectibleKind, pos: Vec2) -> Self {
        Self {
            kind,
            body: Body::new(pos, Vec2::splat(Self::SIZE)),
            timer: 0,
        }
    }

    /// Bob in place. No gravity, no platform contact.
    pub fn tick(&mut self) {
        self.timer += 1;
        self.body.pos.y += (self.timer as f32 * 0.1).sin() * 0.5;
    }
}
