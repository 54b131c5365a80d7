//! Coordinate spaces and the view transform.
//!
//! Two spaces meet here:
//! - screen space: logical pixels, origin at the surface top-left, +Y down
//! - data space: the zoom/pan-independent space shapes are described in, +Y up
//!
//! [`CoordinateSystem`] is the only crossing point between them.

mod coordinate_system;
mod projection;
mod rect;
mod vec2;
mod viewport;

pub use coordinate_system::{
    CoordinateState, CoordinateSystem, ViewError, DEFAULT_ZOOM_FACTOR, MAX_SCALE, MIN_SCALE,
};
pub use projection::Mat4;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
