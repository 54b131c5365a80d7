use crate::render::vertex::Vertex;

/// Default vertex capacity, in records.
pub const DEFAULT_VERTEX_RECORDS: usize = 1024;
/// Default index capacity.
pub const DEFAULT_INDICES: usize = 1024 * 3;

/// CPU-side vertex and index storage for one frame's geometry.
///
/// Each buffer has a high-water mark (`len`) and a logical capacity that
/// mirrors the size of the GPU buffer behind it. Capacity doubles on overflow
/// and never shrinks, so appends stay amortized O(1) and the GPU side is only
/// reallocated `log2(n)` times.
///
/// Growth is reported back as the new storage size in bytes; the owner must
/// forward it to the GPU buffer owner before uploading.
#[derive(Debug)]
pub struct VertexIndexArena {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl VertexIndexArena {
    pub fn new(vertex_records: usize, indices: usize) -> Self {
        let vertex_capacity = vertex_records.max(1);
        let index_capacity = indices.max(1);
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
            vertex_capacity,
            index_capacity,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex records in use.
    #[inline]
    pub fn vertex_len(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex floats in use (always a multiple of [`Vertex::FLOATS`]).
    #[inline]
    pub fn vertex_floats(&self) -> usize {
        self.vertices.len() * Vertex::FLOATS
    }

    #[inline]
    pub fn index_len(&self) -> usize {
        self.indices.len()
    }

    /// Current `(vertex, index)` high-water marks.
    #[inline]
    pub fn marks(&self) -> (usize, usize) {
        (self.vertices.len(), self.indices.len())
    }

    #[inline]
    pub fn vertex_capacity(&self) -> usize {
        self.vertex_capacity
    }

    #[inline]
    pub fn index_capacity(&self) -> usize {
        self.index_capacity
    }

    #[inline]
    pub fn vertex_byte_capacity(&self) -> u64 {
        self.vertex_capacity as u64 * Vertex::STRIDE
    }

    #[inline]
    pub fn index_byte_capacity(&self) -> u64 {
        self.index_capacity as u64 * std::mem::size_of::<u32>() as u64
    }

    /// Makes room for `additional` more records.
    ///
    /// Returns the new vertex storage size in bytes if the capacity grew.
    pub fn ensure_vertex_capacity(&mut self, additional: usize) -> Option<u64> {
        let needed = self.vertices.len() + additional;
        let grown = grow_to_fit(self.vertex_capacity, needed)?;
        self.vertices.reserve_exact(grown - self.vertices.len());
        self.vertex_capacity = grown;
        log::debug!("vertex arena grew to {grown} records");
        Some(self.vertex_byte_capacity())
    }

    /// Makes room for `additional` more indices.
    ///
    /// Returns the new index storage size in bytes if the capacity grew.
    pub fn ensure_index_capacity(&mut self, additional: usize) -> Option<u64> {
        let needed = self.indices.len() + additional;
        let grown = grow_to_fit(self.index_capacity, needed)?;
        self.indices.reserve_exact(grown - self.indices.len());
        self.index_capacity = grown;
        log::debug!("index arena grew to {grown} indices");
        Some(self.index_byte_capacity())
    }

    /// Appends records at the high-water mark.
    ///
    /// Capacity must have been ensured first.
    pub fn append_vertices(&mut self, records: &[Vertex]) {
        debug_assert!(
            self.vertices.len() + records.len() <= self.vertex_capacity,
            "append_vertices past capacity; call ensure_vertex_capacity first"
        );
        self.vertices.extend_from_slice(records);
    }

    /// Appends indices at the high-water mark.
    ///
    /// Index values are absolute record indices. Capacity must have been ensured first.
    pub fn append_indices(&mut self, indices: impl IntoIterator<Item = u32>) {
        self.indices.extend(indices);
        debug_assert!(
            self.indices.len() <= self.index_capacity,
            "append_indices past capacity; call ensure_index_capacity first"
        );
    }

    /// Logical clear. Capacity is retained.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

impl Default for VertexIndexArena {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_RECORDS, DEFAULT_INDICES)
    }
}

/// Doubles `capacity` until it holds `needed`. `None` if it already fits.
fn grow_to_fit(capacity: usize, needed: usize) -> Option<usize> {
    if needed <= capacity {
        return None;
    }
    let mut cap = capacity.max(1);
    while cap < needed {
        cap = cap.saturating_mul(2);
    }
    Some(cap)
}
