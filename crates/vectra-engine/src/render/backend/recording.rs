use crate::coords::Mat4;
use crate::paint::Color;
use crate::render::batch::Topology;
use crate::render::vertex::Vertex;

use super::GpuBackend;

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    ResizeVertexStorage(u64),
    ResizeIndexStorage(u64),
    UpdateVertexRange { byte_offset: u64, len: usize },
    UpdateIndexRange { byte_offset: u64, len: usize },
    SetViewProjection(Mat4),
    ClearSurface(Color),
    DrawIndexed { topology: Topology, index_count: u32, index_byte_offset: u64 },
}

/// Headless backend.
///
/// Records every call in order and mirrors the vertex/index storage bytes, so
/// uploads can be inspected exactly as a GPU would receive them. Useful for
/// tests and for running the engine without a device.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    vertex_storage: Vec<u8>,
    index_storage: Vec<u8>,
    view_projection: Mat4,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drains the recorded calls; storage mirrors are kept.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Draw calls of the recorded stream as `(topology, index_count, index_byte_offset)`.
    pub fn draws(&self) -> Vec<(Topology, u32, u64)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                BackendCall::DrawIndexed { topology, index_count, index_byte_offset } => {
                    Some((topology, index_count, index_byte_offset))
                }
                _ => None,
            })
            .collect()
    }

    #[inline]
    pub fn vertex_storage_len(&self) -> usize {
        self.vertex_storage.len()
    }

    #[inline]
    pub fn index_storage_len(&self) -> usize {
        self.index_storage.len()
    }

    /// The first `count` records of vertex storage.
    pub fn vertices(&self, count: usize) -> Vec<Vertex> {
        let end = (count * Vertex::STRIDE as usize).min(self.vertex_storage.len());
        self.vertex_storage[..end]
            .chunks_exact(Vertex::STRIDE as usize)
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// The first `count` indices of index storage.
    pub fn indices(&self, count: usize) -> Vec<u32> {
        let end = (count * std::mem::size_of::<u32>()).min(self.index_storage.len());
        self.index_storage[..end]
            .chunks_exact(std::mem::size_of::<u32>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    #[inline]
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }
}

fn write_range(storage: &mut [u8], data: &[u8], byte_offset: u64, what: &str) {
    let start = byte_offset as usize;
    let Some(dst) = storage.get_mut(start..start + data.len()) else {
        log::error!(
            "{what} write of {} bytes at {start} exceeds storage of {} bytes",
            data.len(),
            storage.len()
        );
        return;
    };
    dst.copy_from_slice(data);
}

impl GpuBackend for RecordingBackend {
    fn resize_vertex_storage(&mut self, byte_len: u64) {
        self.vertex_storage = vec![0; byte_len as usize];
        self.calls.push(BackendCall::ResizeVertexStorage(byte_len));
    }

    fn resize_index_storage(&mut self, byte_len: u64) {
        self.index_storage = vec![0; byte_len as usize];
        self.calls.push(BackendCall::ResizeIndexStorage(byte_len));
    }

    fn update_vertex_range(&mut self, data: &[u8], byte_offset: u64) {
        write_range(&mut self.vertex_storage, data, byte_offset, "vertex");
        self.calls.push(BackendCall::UpdateVertexRange { byte_offset, len: data.len() });
    }

    fn update_index_range(&mut self, data: &[u8], byte_offset: u64) {
        write_range(&mut self.index_storage, data, byte_offset, "index");
        self.calls.push(BackendCall::UpdateIndexRange { byte_offset, len: data.len() });
    }

    fn set_view_projection(&mut self, matrix: &Mat4) {
        self.view_projection = *matrix;
        self.calls.push(BackendCall::SetViewProjection(*matrix));
    }

    fn clear_surface(&mut self, color: Color) {
        self.calls.push(BackendCall::ClearSurface(color));
    }

    fn draw_indexed(&mut self, topology: Topology, index_count: u32, index_byte_offset: u64) {
        self.calls.push(BackendCall::DrawIndexed { topology, index_count, index_byte_offset });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_discards_and_updates_write_in_place() {
        let mut b = RecordingBackend::new();
        b.resize_index_storage(16);
        b.update_index_range(bytemuck::cast_slice(&[7u32, 8]), 4);
        assert_eq!(b.indices(4), vec![0, 7, 8, 0]);

        b.resize_index_storage(32);
        assert_eq!(b.indices(4), vec![0, 0, 0, 0]);
        assert_eq!(b.index_storage_len(), 32);
    }

    #[test]
    fn out_of_range_write_is_dropped() {
        let mut b = RecordingBackend::new();
        b.resize_index_storage(8);
        b.update_index_range(bytemuck::cast_slice(&[1u32, 2, 3]), 0);
        assert_eq!(b.indices(2), vec![0, 0]);
        assert_eq!(b.calls().len(), 2);
    }

    #[test]
    fn draws_filters_draw_calls() {
        let mut b = RecordingBackend::new();
        b.clear_surface(Color::BLACK);
        b.draw_indexed(Topology::Triangles, 6, 0);
        b.draw_indexed(Topology::Triangles, 3, 24);
        assert_eq!(
            b.draws(),
            vec![(Topology::Triangles, 6, 0), (Topology::Triangles, 3, 24)]
        );
    }
}
