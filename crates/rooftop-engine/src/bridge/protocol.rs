//! Shared frame buffer layout.
//! Must stay in sync with the host's reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Instances: max_instances × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header on every frame so the host can
//! compute offsets without a separate handshake.

use crate::api::types::{GameEvent, GameStatus, WorldEvent};
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::renderer::snapshot::FrameSnapshot;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_EFFECTS_SPLIT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_CAMERA_X: usize = 7;
pub const HEADER_CAMERA_Y: usize = 8;
pub const HEADER_SCORE: usize = 9;
pub const HEADER_HEALTH: usize = 10;
pub const HEADER_STATUS: usize = 11;

pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub const DEFAULT_MAX_INSTANCES: usize = 1024;
    pub const DEFAULT_MAX_EVENTS: usize = 64;

    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;
        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_INSTANCES, Self::DEFAULT_MAX_EVENTS)
    }
}

/// A flat float buffer laid out per `ProtocolLayout`, rewritten every frame.
pub struct SharedFrame {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl SharedFrame {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Write one frame. Instances and events beyond capacity are dropped.
    pub fn write(&mut self, frame: &FrameSnapshot, buffer: &RenderBuffer, events: &[WorldEvent]) {
        let instances = &buffer.instances[..buffer.instances.len().min(self.layout.max_instances)];
        let events = &events[..events.len().min(self.layout.max_events)];
        if instances.len() < buffer.instances.len() {
            log::warn!(
                "Render buffer overflow: {} instances, capacity {}",
                buffer.instances.len(),
                self.layout.max_instances
            );
        }

        let header = &mut self.data[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_MAX_INSTANCES] = self.layout.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        header[HEADER_EFFECTS_SPLIT] = (buffer.effects_split as usize).min(instances.len()) as f32;
        header[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_CAMERA_X] = frame.camera.x;
        header[HEADER_CAMERA_Y] = frame.camera.y;
        header[HEADER_SCORE] = frame.hud.score as f32;
        header[HEADER_HEALTH] = frame.hud.health as f32;
        header[HEADER_STATUS] = match frame.hud.status {
            GameStatus::Playing => 0.0,
            GameStatus::Over => 1.0,
        };

        let start = self.layout.instance_data_offset;
        let floats: &[f32] = bytemuck::cast_slice(instances);
        self.data[start..start + floats.len()].copy_from_slice(floats);

        let mut offset = self.layout.event_data_offset;
        for event in events {
            let wire = event.to_wire();
            let values: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&wire));
            self.data[offset..offset + EVENT_FLOATS].copy_from_slice(values);
            offset += EVENT_FLOATS;
        }
    }
}
