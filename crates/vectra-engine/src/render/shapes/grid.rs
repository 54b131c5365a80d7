use crate::coords::{CoordinateSystem, Vec2};
use crate::paint::Color;

use super::{circle, Geometry};

/// Background dot grid.
///
/// Lattice spacing is `spacing * unit_size` in data units; radii are in data
/// units too, so dots zoom with the content.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridStyle {
    pub spacing: f64,
    /// Every `major_every`-th lattice line (in both axes) carries a major dot.
    pub major_every: i64,
    pub minor_radius: f64,
    pub major_radius: f64,
    pub minor_color: Color,
    pub major_color: Color,
    /// Below this zoom scale only major dots are emitted.
    pub density_threshold: f64,
    /// Upper bound on dots per grid; larger grids are skipped.
    pub max_dots: usize,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: 20.0,
            major_every: 5,
            minor_radius: 1.0,
            major_radius: 2.0,
            minor_color: Color::rgba(1.0, 1.0, 1.0, 0.25),
            major_color: Color::rgba(1.0, 1.0, 1.0, 0.6),
            density_threshold: 0.5,
            max_dots: 20_000,
        }
    }
}

/// Encodes the dots covering the visible area of `coords`.
///
/// `None` when the style is unusable, the view is too far out to index the
/// lattice, or the grid would exceed `max_dots`.
pub fn encode(style: &GridStyle, coords: &CoordinateSystem) -> Option<Geometry> {
    let state = coords.state();
    let step = style.spacing * state.unit_size;
    if !step.is_finite() || step <= 0.0 || style.major_every <= 0 {
        log::warn!("grid rejected: spacing {} / major_every {}", style.spacing, style.major_every);
        return None;
    }

    let bounds = coords.visible_bounds();
    if !bounds.is_finite() {
        return None;
    }
    let (Some((x0, x1)), Some((y0, y1))) = (
        lattice_range(bounds.min.x, bounds.max.x, step),
        lattice_range(bounds.min.y, bounds.max.y, step),
    ) else {
        log::debug!("grid skipped: view too far out for lattice indices");
        return None;
    };

    let majors_only = state.scale < style.density_threshold;
    let mut stride = 1;
    let (mut sx, mut sy) = (x0, y0);
    if majors_only {
        stride = style.major_every;
        let (Some(x), Some(y)) = (next_multiple(x0, stride), next_multiple(y0, stride)) else {
            return None;
        };
        (sx, sy) = (x, y);
    }

    let count = |lo: i64, hi: i64| -> u64 {
        if hi < lo {
            return 0;
        }
        let n = (hi as i128 - lo as i128) / stride as i128 + 1;
        u64::try_from(n).unwrap_or(u64::MAX)
    };
    let dots = count(sx, x1).saturating_mul(count(sy, y1));
    if dots > style.max_dots as u64 {
        log::debug!("grid skipped: {dots} dots exceed cap of {}", style.max_dots);
        return None;
    }

    let mut geometry = Geometry::with_capacity(dots as usize * circle::RECORDS, dots as usize * 3);
    let step_by = usize::try_from(stride).unwrap_or(usize::MAX);
    for ix in (sx..=x1).step_by(step_by) {
        for iy in (sy..=y1).step_by(step_by) {
            let major = ix.rem_euclid(style.major_every) == 0 && iy.rem_euclid(style.major_every) == 0;
            let (radius, color) = if major {
                (style.major_radius, style.major_color)
            } else {
                (style.minor_radius, style.minor_color)
            };
            let center = Vec2::new(ix as f64 * step, iy as f64 * step);
            if let Some(dot) = circle::encode(center, radius, color) {
                geometry.extend(dot);
            }
        }
    }

    log::trace!("grid: {} dots (majors only: {majors_only})", geometry.records.len() / circle::RECORDS);
    Some(geometry)
}

/// Largest lattice index magnitude accepted; beyond 2^53 an `f64` no longer
/// holds every integer, so neighbouring dots would collapse.
const MAX_LATTICE_INDEX: f64 = 9_007_199_254_740_992.0;

/// Lattice indices whose points fall inside `[lo, hi]`, widened by one cell.
/// `None` when either end is past `MAX_LATTICE_INDEX`.
fn lattice_range(lo: f64, hi: f64, step: f64) -> Option<(i64, i64)> {
    let (a, b) = ((lo / step).floor(), (hi / step).ceil());
    (a.abs() <= MAX_LATTICE_INDEX && b.abs() <= MAX_LATTICE_INDEX).then(|| (a as i64, b as i64))
}

fn next_multiple(v: i64, m: i64) -> Option<i64> {
    let r = v.rem_euclid(m);
    if r == 0 { Some(v) } else { v.checked_add(m - r) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;

    fn coords(width: f64, height: f64) -> CoordinateSystem {
        CoordinateSystem::new(Viewport::new(width, height)).unwrap()
    }

    fn centers(g: &Geometry) -> Vec<[f32; 2]> {
        g.records.chunks_exact(circle::RECORDS).map(|c| c[0].position).collect()
    }

    #[test]
    fn covers_visible_bounds_with_lattice() {
        // Bounds [-50, 50] x [-50, 50], step 20 -> indices -3..=3 on each axis.
        let style = GridStyle::default();
        let g = encode(&style, &coords(100.0, 100.0)).unwrap();
        assert_eq!(centers(&g).len(), 49);
        assert!(centers(&g).contains(&[-60.0, 60.0]));
        assert!(centers(&g).contains(&[0.0, 0.0]));
    }

    #[test]
    fn major_dots_use_major_style() {
        let style = GridStyle::default();
        let g = encode(&style, &coords(100.0, 100.0)).unwrap();
        for dot in g.records.chunks_exact(circle::RECORDS) {
            let [x, y] = dot[0].position;
            let major = (x as i64 / 20) % 5 == 0 && (y as i64 / 20) % 5 == 0;
            let expected = if major { style.major_radius } else { style.minor_radius };
            assert_eq!(dot[0].shape[2], expected as f32);
        }
    }

    #[test]
    fn low_zoom_keeps_only_major_dots() {
        let style = GridStyle::default();
        let mut cs = coords(400.0, 400.0);
        cs.set(1.0, 0.25, 0.0, 0.0).unwrap();
        // Bounds [-800, 800]; step 20 -> indices -40..=40, majors every 5.
        let g = encode(&style, &cs).unwrap();
        let c = centers(&g);
        assert_eq!(c.len(), 17 * 17);
        assert!(g.records.iter().all(|v| v.shape[2] == style.major_radius as f32));
    }

    #[test]
    fn dot_cap_skips_grid() {
        let style = GridStyle { max_dots: 10, ..GridStyle::default() };
        assert!(encode(&style, &coords(100.0, 100.0)).is_none());
    }

    #[test]
    fn spacing_follows_unit_size() {
        let style = GridStyle::default();
        let mut cs = coords(100.0, 100.0);
        cs.set(2.0, 1.0, 0.0, 0.0).unwrap();
        // Bounds [-25, 25], step 40 -> indices -1..=1.
        let g = encode(&style, &cs).unwrap();
        assert_eq!(centers(&g).len(), 9);
        assert!(centers(&g).contains(&[40.0, -40.0]));
    }

    #[test]
    fn invalid_style_is_rejected() {
        let cs = coords(100.0, 100.0);
        assert!(encode(&GridStyle { spacing: 0.0, ..GridStyle::default() }, &cs).is_none());
        assert!(encode(&GridStyle { major_every: 0, ..GridStyle::default() }, &cs).is_none());
    }

    #[test]
    fn next_multiple_rounds_up() {
        assert_eq!(next_multiple(-7, 5), Some(-5));
        assert_eq!(next_multiple(-5, 5), Some(-5));
        assert_eq!(next_multiple(3, 5), Some(5));
        assert_eq!(next_multiple(i64::MAX - 1, i64::MAX - 2), None);
    }

    #[test]
    fn far_pan_skips_grid_instead_of_overflowing() {
        let style = GridStyle::default();
        let mut cs = coords(100.0, 100.0);
        cs.set(1.0, 1.0, 1e21, 0.0).unwrap();
        assert!(encode(&style, &cs).is_none());

        cs.set(1.0, 0.25, -1e300, 1e300).unwrap();
        assert!(encode(&style, &cs).is_none());
    }

    #[test]
    fn distant_but_representable_pan_still_draws() {
        let style = GridStyle::default();
        let mut cs = coords(100.0, 100.0);
        // Far from the origin but well inside the exact integer range of f64.
        let pan = 20.0 * (1u64 << 40) as f64;
        cs.set(1.0, 1.0, pan, 0.0).unwrap();
        let g = encode(&style, &cs).unwrap();
        assert_eq!(centers(&g).len(), 49);
    }

    #[test]
    fn lattice_range_rejects_unrepresentable_indices() {
        assert_eq!(lattice_range(-50.0, 50.0, 20.0), Some((-3, 3)));
        assert_eq!(lattice_range(1e21, 1e21 + 1.0, 1.0), None);
    }
}
