use serde::{Deserialize, Serialize};

use crate::core::body::Rect;

/// Visual surface tag. Has no effect on physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceKind {
    #[default]
    Slate,
    Brick,
    Chimney,
}

/// Static, immutable collision rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    rect: Rect,
    surface: SurfaceKind,
}

impl Platform {
    pub const TILE: f32 = 64.0;

    pub fn new(rect: Rect, surface: SurfaceKind) -> Self {
        Self { rect, surface }
    }

    /// A square tile at grid column `col` with its top at `y`.
    pub fn tile(col: i32, y: f32, surface: SurfaceKind) -> Self {
        Self::new(
            Rect::new(col as f32 * Self::TILE, y, Self::TILE, Self::TILE),
            surface,
        )
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn surface(&self) -> SurfaceKind {
        self.surface
    }
}
