use bytemuck::{Pod, Zeroable};

/// Per-instance render data read straight out of wasm memory by the host.
/// Must match the host's layout: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge in world space.
    pub x: f32,
    /// Top edge in world space.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite class id, see `ViewKind::sprite_id`.
    pub sprite: f32,
    /// Animation frame within the sprite's sequence. Hue in degrees for particles.
    pub frame: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Bit set of `FLAG_*` values.
    pub flags: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Draw mirrored horizontally.
    pub const FLAG_FLIP: u32 = 1;
    /// Draw with the hit flash tint.
    pub const FLAG_FLASH: u32 = 2;
    /// Draw a health bar above the sprite.
    pub const FLAG_HEALTH_BAR: u32 = 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Render buffer containing every visible instance for one frame.
pub struct RenderBuffer {
    /// Sprites first, particles after `effects_split`.
    pub instances: Vec<RenderInstance>,
    /// Index of the first particle instance. Particles are drawn additively.
    pub effects_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            effects_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.effects_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_effects_split(&mut self, split: u32) {
        self.effects_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// The instances as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
