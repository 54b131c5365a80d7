//! GPU buffer owner interface.
//!
//! The shape renderer never talks to a graphics API directly. Everything it
//! needs from the GPU side goes through [`GpuBackend`]:
//! - storage (re)allocation when the arena grows
//! - range uploads (full flush or a single batch)
//! - the view-projection uniform
//! - clearing and indexed draws
//!
//! Storage starts unallocated; the renderer sizes both buffers when it is
//! constructed. [`WgpuBackend`] drives a real device; [`RecordingBackend`]
//! is headless.

mod recording;
mod wgpu_backend;

pub use recording::{BackendCall, RecordingBackend};
pub use wgpu_backend::WgpuBackend;

use crate::coords::Mat4;
use crate::paint::Color;
use crate::render::batch::Topology;

pub trait GpuBackend {
    /// Reallocates vertex storage to `byte_len` bytes. Previous contents are discarded.
    fn resize_vertex_storage(&mut self, byte_len: u64);

    /// Reallocates index storage to `byte_len` bytes. Previous contents are discarded.
    fn resize_index_storage(&mut self, byte_len: u64);

    /// Writes `data` into vertex storage at `byte_offset`.
    fn update_vertex_range(&mut self, data: &[u8], byte_offset: u64);

    /// Writes `data` into index storage at `byte_offset`.
    fn update_index_range(&mut self, data: &[u8], byte_offset: u64);

    fn set_view_projection(&mut self, matrix: &Mat4);

    /// Starts a frame cleared to `color`. Draws issued afterwards belong to that frame.
    fn clear_surface(&mut self, color: Color);

    /// Draws `index_count` u32 indices starting at `index_byte_offset`.
    fn draw_indexed(&mut self, topology: Topology, index_count: u32, index_byte_offset: u64);
}
