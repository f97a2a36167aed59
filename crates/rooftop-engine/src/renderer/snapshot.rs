//! Read-only per-frame view of the world for renderers and UI hosts.

use glam::Vec2;
use serde::Serialize;

use crate::api::types::GameStatus;
use crate::components::collectible::CollectibleKind;
use crate::components::enemy::EnemyKind;
use crate::components::platform::SurfaceKind;
use crate::components::player::{AttackKind, PlayerState};
use crate::core::body::Rect;

/// What a view depicts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "variant")]
pub enum ViewKind {
    Platform(SurfaceKind),
    Player(PlayerState),
    Enemy(EnemyKind),
    Item(CollectibleKind),
    Particle,
}

impl ViewKind {
    /// Numeric sprite class written into `RenderInstance::sprite`.
    /// Platforms 0-2, player 10-14, enemies 20-25, items 30-32, particles 40.
    pub fn sprite_id(&self) -> f32 {
        let id = match *self {
            ViewKind::Platform(surface) => match surface {
                SurfaceKind::Slate => 0,
                SurfaceKind::Brick => 1,
                SurfaceKind::Chimney => 2,
            },
            ViewKind::Player(state) => {
                10 + match state {
                    PlayerState::Idle => 0,
                    PlayerState::Running => 1,
                    PlayerState::JumpingUp => 2,
                    PlayerState::Falling => 3,
                    PlayerState::Attacking => 4,
                }
            }
            ViewKind::Enemy(kind) => {
                20 + match kind {
                    EnemyKind::Mouse => 0,
                    EnemyKind::Dog => 1,
                    EnemyKind::Squirrel => 2,
                    EnemyKind::BigCat => 3,
                    EnemyKind::Bear => 4,
                    EnemyKind::Fish => 5,
                }
            }
            ViewKind::Item(kind) => {
                30 + match kind {
                    CollectibleKind::Fish => 0,
                    CollectibleKind::Heart => 1,
                    CollectibleKind::Coin => 2,
                }
            }
            ViewKind::Particle => 40,
        };
        id as f32
    }
}

/// One drawable thing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: ViewKind,
    pub rect: Rect,
    pub frame: u32,
    /// Faces left (sprites are authored facing right).
    pub flip: bool,
    /// Hit flash active.
    pub flash: bool,
    pub alpha: f32,
    /// Health bar fill (0..=1), when one should be shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_bar: Option<f32>,
    /// Particle hue in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<f32>,
    /// Which swing is playing, for the player while attacking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack: Option<AttackKind>,
}

impl EntityView {
    pub fn new(kind: ViewKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            frame: 0,
            flip: false,
            flash: false,
            alpha: 1.0,
            health_bar: None,
            hue: None,
            attack: None,
        }
    }
}

/// Heads-up display values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub status: GameStatus,
    pub level: String,
    pub enemies_left: usize,
    /// Boss health fraction while a boss is alive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss: Option<f32>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// Top-left corner of the visible area.
    pub camera: Vec2,
    pub hud: Hud,
    /// Back to front: platforms, items, enemies, player, particles.
    pub views: Vec<EntityView>,
}

impl FrameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
