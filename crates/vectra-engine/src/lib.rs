//! Vectra engine crate.
//!
//! A batched 2D vector-shape renderer on wgpu, plus the window/GPU runtime
//! that hosts it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
