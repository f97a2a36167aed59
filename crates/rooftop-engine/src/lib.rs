pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{LandingBand, LandingBands, Physics, PlayerTuning, WorldConfig};
pub use api::types::{EntityId, GameEvent, GameStatus, WorldEvent};
pub use assets::level::{EnemySpawn, ItemSpawn, Level, PlatformRow};
pub use bridge::protocol::{ProtocolLayout, SharedFrame};
pub use components::collectible::{Collectible, CollectibleKind};
pub use components::enemy::{ArchetypeStats, Enemy, EnemyKind, Motion, Strategy};
pub use components::particle::Particle;
pub use components::platform::{Platform, SurfaceKind};
pub use components::player::{AttackKind, Player, PlayerState};
pub use self::core::body::{Body, Rect};
pub use self::core::collision::{overlaps, resolve, settle, Contact, Side};
pub use self::core::time::FrameClock;
pub use self::core::world::World;
pub use input::keys::{Action, InputSnapshot, KeyBindings, KeyState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{Camera, EntityView, FrameSnapshot, Hud, RenderBuffer, RenderInstance, Renderer, ViewKind};
pub use systems::effects::Effects;
pub use systems::render::{build_render_buffer, snapshot};
