//! Color model shared by the shape API and the backends.

pub mod color;

pub use color::Color;
