//! GPU device and surface management.
//!
//! [`Gpu`] creates the wgpu instance/adapter/device/queue for one window,
//! keeps its surface configured, and hands out frames to render into.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
