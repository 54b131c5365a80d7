//! Batched shape rendering.
//!
//! Shapes are described in data space and encoded into one shared
//! vertex/index arena. Each batch key owns one or more contiguous runs of it
//! and is drawn with a single indexed call through a [`GpuBackend`].
//!
//! Convention:
//! - data space is +Y up; the view-projection uniform maps it to NDC
//! - every vertex record is 10 f32 (position, color, mode + params)

pub mod backend;
pub mod batch;
mod ctx;
mod renderer;
pub mod shapes;
pub mod vertex;

pub use backend::{GpuBackend, RecordingBackend, WgpuBackend};
pub use batch::{BatchKey, ShapeKind, Topology};
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::{EngineConfig, FramePolicy, FrameStats, ShapeRenderer};
pub use shapes::GridStyle;
pub use vertex::Vertex;
