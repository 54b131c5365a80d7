//! Polygon fill triangulation on top of lyon's fill tessellator.

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers, VertexSource,
};
use lyon::math::point;
use lyon::path::Path;

use crate::coords::Vec2;

/// Marks a tessellator vertex that is not one of the outline's corners.
const NOT_A_CORNER: u32 = u32::MAX;

/// Triangulates a polygon outline (either winding).
///
/// Returns `3 * (n - 2)` indices into `points`, or nothing for `n < 3`.
///
/// Collinear or repeated corners that the tessellator absorbs are padded
/// with zero-area triangles so the count stays `n - 2`. Self-intersecting
/// outlines need vertices the outline does not have; they get a fan over
/// the corners instead.
pub fn triangulate(points: &[Vec2]) -> Vec<u32> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let target = 3 * (n - 2);
    match fill(points) {
        Some(mut indices) if indices.len() <= target => {
            pad_degenerate(&mut indices, n, target);
            indices
        }
        _ => {
            log::trace!("outline of {n} points is not simple; using a fan");
            fan(n)
        }
    }
}

/// Tessellates the closed outline and maps each output vertex back to the
/// corner it came from. `None` if any vertex is not a corner.
fn fill(points: &[Vec2]) -> Option<Vec<u32>> {
    let mut builder = Path::builder();
    builder.begin(to_point(points[0]));
    for &p in &points[1..] {
        builder.line_to(to_point(p));
    }
    builder.end(true);
    let path = builder.build();

    let mut geometry: VertexBuffers<u32, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    let result = tessellator.tessellate_path(
        &path,
        &FillOptions::default(),
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| corner_of(&vertex)),
    );
    if let Err(e) = result {
        log::warn!("polygon tessellation failed: {e:?}");
        return None;
    }

    let n = points.len() as u32;
    geometry
        .indices
        .iter()
        .map(|&i| geometry.vertices.get(i as usize).copied().filter(|&c| c < n))
        .collect()
}

fn corner_of(vertex: &FillVertex<'_>) -> u32 {
    vertex
        .sources()
        .find_map(|s| match s {
            VertexSource::Endpoint { id } => Some(id.to_usize() as u32),
            _ => None,
        })
        .unwrap_or(NOT_A_CORNER)
}

fn to_point(p: Vec2) -> lyon::math::Point {
    point(p.x as f32, p.y as f32)
}

/// Tops `indices` up to `target` with zero-area triangles, unused corners first.
fn pad_degenerate(indices: &mut Vec<u32>, n: usize, target: usize) {
    let mut used = vec![false; n];
    for &i in indices.iter() {
        used[i as usize] = true;
    }
    let mut spare = (0..n as u32).filter(|&i| !used[i as usize]).chain(std::iter::repeat(0));
    while indices.len() < target {
        let i = spare.next().unwrap_or(0);
        indices.extend([i, i, i]);
    }
}

fn fan(n: usize) -> Vec<u32> {
    (1..n as u32 - 1).flat_map(|i| [0, i, i + 1]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Vec2> {
        raw.iter().map(|&p| Vec2::from(p)).collect()
    }

    /// Twice the signed area of the outline.
    fn signed_area(points: &[Vec2]) -> f64 {
        let n = points.len();
        (0..n).map(|i| points[i].cross(points[(i + 1) % n])).sum()
    }

    fn covered_area(points: &[Vec2], indices: &[u32]) -> f64 {
        indices
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (points[t[0] as usize], points[t[1] as usize], points[t[2] as usize]);
                ((b - a).cross(c - a) / 2.0).abs()
            })
            .sum()
    }

    fn assert_well_formed(points: &[Vec2], indices: &[u32]) {
        assert_eq!(indices.len(), 3 * (points.len() - 2));
        assert!(indices.iter().all(|&i| (i as usize) < points.len()));
    }

    #[test]
    fn fewer_than_three_points_yield_nothing() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&pts(&[(0.0, 0.0), (1.0, 0.0)])).is_empty());
    }

    #[test]
    fn triangle_uses_each_corner_once() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let mut idx = triangulate(&p);
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn convex_square() {
        let p = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        assert!((covered_area(&p, &idx) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn concave_l_shape_covers_exact_area() {
        let p = pts(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        assert!((covered_area(&p, &idx) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn clockwise_outline_is_handled() {
        let p = pts(&[
            (0.0, 3.0),
            (1.0, 3.0),
            (1.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
            (0.0, 0.0),
        ]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        assert!((covered_area(&p, &idx) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn concave_arrow_covers_exact_area() {
        // Arrow head with the notch at index 2.
        let p = pts(&[(0.0, 0.0), (4.0, 2.0), (1.0, 2.0), (0.0, 4.0)]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        let area = signed_area(&p).abs() / 2.0;
        assert!((covered_area(&p, &idx) - area).abs() < 1e-12);
    }

    #[test]
    fn collinear_corner_keeps_count_and_area() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        assert!((covered_area(&p, &idx) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_still_give_in_range_triangles() {
        let p = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let idx = triangulate(&p);
        assert_well_formed(&p, &idx);
        assert_eq!(covered_area(&p, &idx), 0.0);
    }

    #[test]
    fn self_intersecting_bowtie_is_well_formed() {
        let p = pts(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        assert_well_formed(&p, &triangulate(&p));
    }

    #[test]
    fn padding_prefers_unused_corners() {
        let mut idx = vec![0, 2, 3];
        pad_degenerate(&mut idx, 4, 6);
        assert_eq!(idx, vec![0, 2, 3, 1, 1, 1]);
    }

    // ── generated outlines ────────────────────────────────────────────────

    /// Linear congruential generator; enough to vary the outlines reproducibly.
    struct Lcg(u64);

    impl Lcg {
        fn unit(&mut self) -> f64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    /// Star-shaped about the origin: strictly increasing angles, alternating
    /// outer and inner radii with jitter. Always simple, mostly concave.
    fn star(n: usize, rng: &mut Lcg) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * (i as f64 + 0.3 * rng.unit()) / n as f64;
                let r = if i % 2 == 0 { 8.0 + 4.0 * rng.unit() } else { 3.0 + 3.0 * rng.unit() };
                Vec2::new(r * a.cos(), r * a.sin())
            })
            .collect()
    }

    #[test]
    fn star_outlines_cover_exact_area() {
        let mut rng = Lcg(0x5eed);
        for n in 3..=64 {
            for _ in 0..4 {
                let mut p = star(n, &mut rng);
                if rng.unit() < 0.5 {
                    p.reverse();
                }
                let idx = triangulate(&p);
                assert_well_formed(&p, &idx);

                let area = signed_area(&p).abs() / 2.0;
                let covered = covered_area(&p, &idx);
                assert!((covered - area).abs() <= 1e-9 * area, "n = {n}: covered {covered}, area {area}");
            }
        }
    }
}
