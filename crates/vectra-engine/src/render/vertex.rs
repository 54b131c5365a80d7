//! Interleaved vertex record shared by every shape batch.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Corner role of a line vertex. The shader offsets the vertex along the
/// segment normal by `±width / 2` according to the role.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LineCorner {
    A,
    B,
    C,
    D,
}

/// Corner role of a circle vertex. The shader places the three corners of a
/// triangle circumscribing the disc.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CircleCorner {
    First,
    Second,
    Third,
}

impl CircleCorner {
    pub const ALL: [CircleCorner; 3] = [CircleCorner::First, CircleCorner::Second, CircleCorner::Third];

    #[inline]
    fn role(self) -> f32 {
        match self {
            CircleCorner::First => 1.0,
            CircleCorner::Second => 2.0,
            CircleCorner::Third => 3.0,
        }
    }
}

/// Shader-side formula applied to a vertex.
///
/// The numeric encoding is a contract with `shaders/shapes.wgsl`:
///
/// | tag | mode                | params              |
/// |-----|---------------------|---------------------|
/// | 0   | plain triangle      | `(1, 0, 0)`         |
/// | 1-4 | line corner A-D     | `(width, dx, dy)`   |
/// | 5   | circle corner       | `(role, r, r)`      |
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeMode {
    Triangle,
    Line(LineCorner),
    Circle(CircleCorner),
}

impl ShapeMode {
    pub const TRIANGLE_TAG: f32 = 0.0;
    pub const CIRCLE_TAG: f32 = 5.0;

    #[inline]
    pub fn tag(self) -> f32 {
        match self {
            ShapeMode::Triangle => Self::TRIANGLE_TAG,
            ShapeMode::Line(LineCorner::A) => 1.0,
            ShapeMode::Line(LineCorner::B) => 2.0,
            ShapeMode::Line(LineCorner::C) => 3.0,
            ShapeMode::Line(LineCorner::D) => 4.0,
            ShapeMode::Circle(_) => Self::CIRCLE_TAG,
        }
    }

    /// Decodes the mode+params block of a record. `None` for unknown tags.
    #[cfg(test)]
    pub(crate) fn decode(shape: [f32; 4]) -> Option<ShapeMode> {
        let [tag, p0, ..] = shape;
        let mode = match tag as i32 {
            0 => ShapeMode::Triangle,
            1 => ShapeMode::Line(LineCorner::A),
            2 => ShapeMode::Line(LineCorner::B),
            3 => ShapeMode::Line(LineCorner::C),
            4 => ShapeMode::Line(LineCorner::D),
            5 => match p0 as i32 {
                1 => ShapeMode::Circle(CircleCorner::First),
                2 => ShapeMode::Circle(CircleCorner::Second),
                3 => ShapeMode::Circle(CircleCorner::Third),
                _ => return None,
            },
            _ => return None,
        };
        (mode.tag() == tag).then_some(mode)
    }
}

/// One vertex record: 10 x f32, 40 bytes.
///
///  offset  0  position  [f32; 2]   loc 0
///  offset  8  color     [f32; 4]   loc 1  (straight alpha, normalized)
///  offset 24  shape     [f32; 4]   loc 2  (mode tag, p0, p1, p2)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub shape: [f32; 4],
}

impl Vertex {
    /// Floats per record.
    pub const FLOATS: usize = 10;
    /// Bytes per record.
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x4, // color
        2 => Float32x4  // mode + params
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    #[inline]
    pub fn triangle(position: Vec2, color: Color) -> Self {
        Self {
            position: position.to_f32(),
            color: color.to_array(),
            shape: [ShapeMode::TRIANGLE_TAG, 1.0, 0.0, 0.0],
        }
    }

    #[inline]
    pub fn line(position: Vec2, color: Color, corner: LineCorner, width: f32, delta: Vec2) -> Self {
        let [dx, dy] = delta.to_f32();
        Self {
            position: position.to_f32(),
            color: color.to_array(),
            shape: [ShapeMode::Line(corner).tag(), width, dx, dy],
        }
    }

    #[inline]
    pub fn circle(center: Vec2, color: Color, corner: CircleCorner, radius: f32) -> Self {
        Self {
            position: center.to_f32(),
            color: color.to_array(),
            shape: [ShapeMode::CIRCLE_TAG, corner.role(), radius, radius],
        }
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> Option<ShapeMode> {
        ShapeMode::decode(self.shape)
    }
}
