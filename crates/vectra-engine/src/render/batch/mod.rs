//! Growable vertex/index storage and the batch bookkeeping layered on top of it.

mod arena;
mod registry;

pub use arena::{VertexIndexArena, DEFAULT_INDICES, DEFAULT_VERTEX_RECORDS};
pub use registry::{BatchKey, BatchRegistry, DrawBatch, DrawCall, ShapeKind, Topology};
