pub mod camera;
pub mod instance;
pub mod snapshot;
pub mod traits;

pub use camera::Camera;
pub use instance::{RenderBuffer, RenderInstance};
pub use snapshot::{EntityView, FrameSnapshot, Hud, ViewKind};
pub use traits::Renderer;
