use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::config::{Physics, WorldConfig};
use crate::components::collectible::CollectibleKind;
use crate::components::enemy::EnemyKind;
use crate::components::platform::{Platform, SurfaceKind};

/// Level layout, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Where the player spawns and respawns. Falls back to the configured start.
    #[serde(default)]
    pub player_start: Option<Vec2>,
    pub platforms: Vec<PlatformRow>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub items: Vec<ItemSpawn>,
}

/// A horizontal run of `count` square tiles starting at grid column `start_col`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRow {
    pub start_col: i32,
    /// Top edge of every tile in the row.
    pub y: f32,
    pub count: u32,
    #[serde(default)]
    pub surface: SurfaceKind,
}

/// Enemy placement. `kind` is kept as a raw tag so unknown kinds can be
/// skipped instead of failing the whole level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: String,
    pub x: f32,
    /// Top edge. When absent the enemy rests on the ground row.
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub patrol_distance: Option<f32>,
    /// Initial heading, -1 or +1.
    #[serde(default)]
    pub direction: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
}

/// An enemy spawn whose tag matched a known archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpawn {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub patrol_distance: Option<f32>,
    pub direction: Option<f32>,
}

impl Level {
    /// Parse a level from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Top edge of the ground row: one tile above the bottom of the world.
    pub fn ground_top(physics: &Physics) -> f32 {
        physics.world_height - Platform::TILE
    }

    /// Expand every row into individual tiles.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.iter().flat_map(|row| {
            (0..row.count as i32).map(move |i| Platform::tile(row.start_col + i, row.y, row.surface))
        })
    }

    /// Known enemy spawns with their final positions. Unknown tags are
    /// skipped with a warning.
    pub fn resolve_enemies(&self, physics: &Physics) -> Vec<ResolvedSpawn> {
        let ground = Self::ground_top(physics);
        self.enemies
            .iter()
            .filter_map(|spawn| {
                let Some(kind) = EnemyKind::from_tag(&spawn.kind) else {
                    log::warn!(
                        "{}: skipping enemy with unknown kind {:?} at x={}",
                        self.name,
                        spawn.kind,
                        spawn.x
                    );
                    return None;
                };
                let y = spawn.y.unwrap_or_else(|| kind.rest_y(ground));
                Some(ResolvedSpawn {
                    kind,
                    pos: Vec2::new(spawn.x, y),
                    patrol_distance: spawn.patrol_distance,
                    direction: spawn.direction,
                })
            })
            .collect()
    }

    /// Right edge of the furthest tile.
    pub fn width(&self) -> f32 {
        self.platforms
            .iter()
            .map(|row| (row.start_col + row.count as i32) as f32 * Platform::TILE)
            .fold(0.0, f32::max)
    }

    /// The built-in long level: a ground row spanning the whole map, raised
    /// sections along the way, and a bear waiting at the end. A chimney
    /// stack closes the right edge so nothing walks off it.
    pub fn rooftops(config: &WorldConfig) -> Self {
        let h = config.physics.world_height;
        let row = |start_col: i32, end_col: i32, y: f32, surface: SurfaceKind| PlatformRow {
            start_col,
            y,
            count: (end_col - start_col) as u32,
            surface,
        };
        let platforms = vec![
            row(0, 137, h - 64.0, SurfaceKind::Slate),
            row(136, 137, h - 128.0, SurfaceKind::Chimney),
            row(5, 15, h - 200.0, SurfaceKind::Brick),
            row(12, 22, h - 300.0, SurfaceKind::Slate),
            row(25, 35, h - 190.0, SurfaceKind::Brick),
            row(30, 40, h - 280.0, SurfaceKind::Chimney),
            row(45, 55, h - 220.0, SurfaceKind::Brick),
            row(50, 60, h - 320.0, SurfaceKind::Slate),
            row(65, 75, h - 190.0, SurfaceKind::Brick),
            row(70, 80, h - 260.0, SurfaceKind::Chimney),
            row(85, 95, h - 200.0, SurfaceKind::Brick),
            row(90, 100, h - 300.0, SurfaceKind::Slate),
            row(105, 112, h - 240.0, SurfaceKind::Chimney),
        ];

        use EnemyKind::*;
        let roster = [
            (Mouse, 300.0),
            (Mouse, 500.0),
            (Dog, 800.0),
            (Mouse, 1200.0),
            (Squirrel, 1500.0),
            (Dog, 1800.0),
            (Mouse, 2100.0),
            (Squirrel, 2400.0),
            (Dog, 2700.0),
            (BigCat, 3000.0),
            (Mouse, 3300.0),
            (Dog, 3600.0),
            (Squirrel, 3900.0),
            (Mouse, 4200.0),
            (BigCat, 4950.0),
            (Dog, 4800.0),
            (Squirrel, 5100.0),
            (Mouse, 5400.0),
            (Dog, 5700.0),
            (BigCat, 6000.0),
            (Squirrel, 6300.0),
            (Dog, 6600.0),
            (BigCat, 6900.0),
            (Mouse, 7200.0),
            (Squirrel, 7500.0),
            (Dog, 7800.0),
            (BigCat, 8100.0),
            (Bear, 8400.0),
        ];
        let mut enemies: Vec<EnemySpawn> = roster
            .iter()
            .map(|&(kind, x)| EnemySpawn {
                kind: kind.tag().to_string(),
                x,
                y: None,
                patrol_distance: None,
                direction: None,
            })
            .collect();
        // Fish drift over the raised sections.
        for x in [2000.0, 4600.0] {
            enemies.push(EnemySpawn {
                kind: Fish.tag().to_string(),
                x,
                y: Some(h - 380.0),
                patrol_distance: None,
                direction: None,
            });
        }

        let items = vec![
            ItemSpawn { kind: CollectibleKind::Coin, x: 600.0, y: h - 250.0 },
            ItemSpawn { kind: CollectibleKind::Fish, x: 1000.0, y: h - 350.0 },
            ItemSpawn { kind: CollectibleKind::Coin, x: 1900.0, y: h - 230.0 },
            ItemSpawn { kind: CollectibleKind::Heart, x: 3200.0, y: h - 380.0 },
            ItemSpawn { kind: CollectibleKind::Coin, x: 4400.0, y: h - 270.0 },
            ItemSpawn { kind: CollectibleKind::Fish, x: 5200.0, y: h - 120.0 },
            ItemSpawn { kind: CollectibleKind::Heart, x: 6200.0, y: h - 120.0 },
            ItemSpawn { kind: CollectibleKind::Heart, x: 8000.0, y: h - 120.0 },
        ];

        Self {
            name: "Rooftops".to_string(),
            player_start: Some(config.player.start),
            platforms,
            enemies,
            items,
        }
    }
}
