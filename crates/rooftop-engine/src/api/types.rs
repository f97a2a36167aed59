use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Unique identifier for an enemy (or any other tracked entity) in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityId(pub u32);

/// Whether the session is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    /// Player health reached zero. The world stops stepping until restarted.
    Over,
}

/// Domain events produced by one world step.
/// Drained by the host every frame; never used for control flow inside the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// An attack connected. `points` were credited to the score.
    EnemyHit { id: EntityId, points: u32 },
    /// The enemy's health reached zero.
    EnemyDefeated { id: EntityId, x: f32, y: f32 },
    /// The player lost one health point.
    PlayerHurt { health: i32 },
    /// The player fell out of the world and was put back at the level start.
    PlayerRespawned,
    /// A pickup was consumed.
    ItemCollected { score: u32, heal: i32 },
    /// Player health reached zero.
    GameOver,
}

impl WorldEvent {
    pub const KIND_ENEMY_HIT: f32 = 1.0;
    pub const KIND_ENEMY_DEFEATED: f32 = 2.0;
    pub const KIND_PLAYER_HURT: f32 = 3.0;
    pub const KIND_PLAYER_RESPAWNED: f32 = 4.0;
    pub const KIND_ITEM_COLLECTED: f32 = 5.0;
    pub const KIND_GAME_OVER: f32 = 6.0;

    /// Pack the event into the 4-float wire record read by the host.
    pub fn to_wire(&self) -> GameEvent {
        match *self {
            WorldEvent::EnemyHit { id, points } => GameEvent {
                kind: Self::KIND_ENEMY_HIT,
                a: id.0 as f32,
                b: points as f32,
                c: 0.0,
            },
            WorldEvent::EnemyDefeated { id, x, y } => GameEvent {
                kind: Self::KIND_ENEMY_DEFEATED,
                a: id.0 as f32,
                b: x,
                c: y,
            },
            WorldEvent::PlayerHurt { health } => GameEvent {
                kind: Self::KIND_PLAYER_HURT,
                a: health as f32,
                ..GameEvent::default()
            },
            WorldEvent::PlayerRespawned => GameEvent {
                kind: Self::KIND_PLAYER_RESPAWNED,
                ..GameEvent::default()
            },
            WorldEvent::ItemCollected { score, heal } => GameEvent {
                kind: Self::KIND_ITEM_COLLECTED,
                a: score as f32,
                b: heal as f32,
                c: 0.0,
            },
            WorldEvent::GameOver => GameEvent {
                kind: Self::KIND_GAME_OVER,
                ..GameEvent::default()
            },
        }
    }
}

/// A game event as laid out for the host's shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
