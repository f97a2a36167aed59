//! Renderer trait for drawing backends.
//!
//! The core never draws. A backend receives the frame snapshot (and, if it
//! wants the packed form, the render buffer built from it) once per frame.

use super::instance::RenderBuffer;
use super::snapshot::FrameSnapshot;

/// A drawing backend (canvas, WebGPU, terminal, test recorder).
pub trait Renderer {
    /// Backend identifier (e.g. "canvas2d", "webgpu").
    fn backend(&self) -> &'static str;

    /// Draw one frame.
    fn draw(&mut self, frame: &FrameSnapshot, buffer: &RenderBuffer);

    /// Handle a viewport resize.
    fn resize(&mut self, _width: u32, _height: u32) {}
}
