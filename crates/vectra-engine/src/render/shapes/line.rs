use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::vertex::{LineCorner, Vertex};

use super::Geometry;

/// Records per line.
pub const RECORDS: usize = 6;

/// Encodes the segment `a`-`b` as a quad expanded by the shader.
///
/// Two triangles `(a, a, b)` and `(a, b, b)` with corner roles
/// `A, B, C` / `B, C, D`; every record carries `(width, dx, dy)`.
/// Zero-length segments are accepted and render nothing.
pub fn encode(a: Vec2, b: Vec2, width: f64, color: Color) -> Option<Geometry> {
    if !a.is_finite() || !b.is_finite() || !width.is_finite() {
        log::warn!("line rejected: non-finite input ({a:?} -> {b:?}, width {width})");
        return None;
    }

    let delta = b - a;
    let w = width as f32;
    let corners = [
        (a, LineCorner::A),
        (a, LineCorner::B),
        (b, LineCorner::C),
        (a, LineCorner::B),
        (b, LineCorner::C),
        (b, LineCorner::D),
    ];

    let records = corners
        .into_iter()
        .map(|(p, corner)| Vertex::line(p, color, corner, w, delta))
        .collect();

    Some(Geometry {
        records,
        indices: (0..RECORDS as u32).collect(),
    })
}
