//! Shape encoders.
//!
//! Each encoder turns one shape into vertex records plus indices relative to
//! the shape's first record. The renderer rebases the indices onto the arena
//! and files the result under a batch key.
//!
//! Encoders validate their input and return `None` (after a `log::warn!`) for
//! shapes that cannot be drawn; nothing reaches the arena in that case.

pub mod circle;
pub mod grid;
pub mod line;
pub mod polygon;
mod triangulate;

pub use grid::GridStyle;
pub use triangulate::triangulate;

use crate::render::vertex::Vertex;

/// Records and shape-local indices produced by one encoder call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub records: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn with_capacity(records: usize, indices: usize) -> Self {
        Self {
            records: Vec::with_capacity(records),
            indices: Vec::with_capacity(indices),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends another geometry, rebasing its indices past the current records.
    pub fn extend(&mut self, other: Geometry) {
        let base = self.records.len() as u32;
        self.records.extend(other.records);
        self.indices.extend(other.indices.into_iter().map(|i| base + i));
    }
}
