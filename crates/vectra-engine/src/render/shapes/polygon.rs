use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::vertex::Vertex;

use super::{triangulate, Geometry};

/// Encodes a filled polygon outline: one plain-triangle record per point,
/// triangulated by ear clipping.
pub fn encode(points: &[Vec2], color: Color) -> Option<Geometry> {
    if points.len() < 3 {
        log::warn!("polygon rejected: {} points, need at least 3", points.len());
        return None;
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        log::warn!("polygon rejected: non-finite point {p:?}");
        return None;
    }

    Some(Geometry {
        records: points.iter().map(|&p| Vertex::triangle(p, color)).collect(),
        indices: triangulate(points),
    })
}
