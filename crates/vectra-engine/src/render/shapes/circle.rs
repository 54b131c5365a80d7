use crate::coords::Vec2;
use crate::paint::Color;
use crate::render::vertex::{CircleCorner, Vertex};

use super::Geometry;

/// Records per circle.
pub const RECORDS: usize = 3;

/// Encodes a filled disc as one triangle whose corners the shader pushes out
/// to circumscribe it; the fragment stage cuts the disc out.
///
/// Radius is in data units and must be finite and positive.
pub fn encode(center: Vec2, radius: f64, color: Color) -> Option<Geometry> {
    if !center.is_finite() {
        log::warn!("circle rejected: non-finite center {center:?}");
        return None;
    }
    if !radius.is_finite() || radius <= 0.0 {
        log::warn!("circle rejected: radius {radius}");
        return None;
    }

    let r = radius as f32;
    Some(Geometry {
        records: CircleCorner::ALL
            .into_iter()
            .map(|corner| Vertex::circle(center, color, corner, r))
            .collect(),
        indices: vec![0, 1, 2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_records_at_center_with_roles() {
        let g = encode(Vec2::new(3.0, -1.0), 2.0, Color::WHITE).unwrap();
        assert_eq!(g.indices, vec![0, 1, 2]);
        let shapes: Vec<[f32; 4]> = g.records.iter().map(|v| v.shape).collect();
        assert_eq!(
            shapes,
            vec![[5.0, 1.0, 2.0, 2.0], [5.0, 2.0, 2.0, 2.0], [5.0, 3.0, 2.0, 2.0]]
        );
        assert!(g.records.iter().all(|v| v.position == [3.0, -1.0]));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        assert!(encode(Vec2::zero(), 0.0, Color::WHITE).is_none());
        assert!(encode(Vec2::zero(), -1.0, Color::WHITE).is_none());
        assert!(encode(Vec2::zero(), f64::NAN, Color::WHITE).is_none());
    }
}
