use std::f64::consts::TAU;

use vectra_engine::coords::Vec2;
use vectra_engine::paint::Color;
use vectra_engine::render::{BatchKey, GpuBackend, GridStyle, ShapeKind, ShapeRenderer};

/// Circles orbiting the origin; they live in their own batch so their
/// positions can be rewritten in place every frame.
///
/// Circles only: a line record also carries its direction, which a
/// position-only rewrite would leave stale.
pub const ORBIT: BatchKey = BatchKey::instance(ShapeKind::Circle, 1);

/// Orbit rotation in radians per second.
const ORBIT_SPEED: f64 = 0.6;
const ORBIT_RADII: [f64; 3] = [90.0, 150.0, 210.0];

/// Demo content shown by the studio window.
#[derive(Debug)]
pub struct Scene {
    pub show_grid: bool,
    grid: GridStyle,
    orbit_angle: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid: GridStyle::default(),
            orbit_angle: 0.0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    /// Submits the whole scene. The grid goes first so everything else draws over it.
    pub fn build<B: GpuBackend>(&self, r: &mut ShapeRenderer<B>) {
        if self.show_grid && !r.add_grid(&self.grid) {
            log::debug!("grid not drawn at this zoom");
        }

        let axis = Color::rgba(0.55, 0.6, 0.7, 1.0);
        r.add_line(Vec2::new(-400.0, 0.0), Vec2::new(400.0, 0.0), 1.5, axis);
        r.add_line(Vec2::new(0.0, -400.0), Vec2::new(0.0, 400.0), 1.5, axis);

        // Concave outline; exercises the triangulator.
        let arrow = [
            Vec2::new(-260.0, 40.0),
            Vec2::new(-180.0, 40.0),
            Vec2::new(-180.0, 90.0),
            Vec2::new(-100.0, 0.0),
            Vec2::new(-180.0, -90.0),
            Vec2::new(-180.0, -40.0),
            Vec2::new(-260.0, -40.0),
        ];
        r.add_polygon(&arrow, Color::from_rgba8(242, 140, 40, 220));

        let hexagon: Vec<Vec2> = (0..6)
            .map(|i| {
                let a = TAU * i as f64 / 6.0;
                Vec2::new(200.0 + 70.0 * a.cos(), 140.0 + 70.0 * a.sin())
            })
            .collect();
        r.add_polygon(&hexagon, Color::from_rgba8(70, 160, 230, 200));

        for (i, radius) in [12.0, 24.0, 40.0].into_iter().enumerate() {
            let x = 120.0 + i as f64 * 100.0;
            r.add_circle(Vec2::new(x, -150.0), radius, Color::from_rgba8(120, 210, 130, 230));
        }

        for c in self.orbit_centers() {
            r.add_circle_in(ORBIT, c, 8.0, Color::from_rgba8(250, 80, 90, 255));
        }
    }

    /// Advances the orbit by `dt` seconds, moving its vertices in place.
    pub fn animate<B: GpuBackend>(&mut self, r: &mut ShapeRenderer<B>, dt: f64) {
        let step = ORBIT_SPEED * dt;
        if step == 0.0 {
            return;
        }
        let (sin, cos) = step.sin_cos();
        let moved = r.update_batch_positions(ORBIT, |positions| {
            for p in positions {
                *p = Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
            }
        });
        if moved {
            self.orbit_angle = (self.orbit_angle + step).rem_euclid(TAU);
        }
    }

    /// Each circle trails the previous one by a third of a turn.
    fn orbit_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        ORBIT_RADII.iter().enumerate().map(move |(i, &radius)| {
            let a = self.orbit_angle + TAU * i as f64 / 3.0;
            Vec2::new(radius * a.cos(), radius * a.sin())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectra_engine::coords::Viewport;
    use vectra_engine::render::{EngineConfig, RecordingBackend};

    fn renderer() -> ShapeRenderer<RecordingBackend> {
        ShapeRenderer::new(RecordingBackend::new(), Viewport::new(800.0, 600.0), EngineConfig::default())
            .unwrap()
    }

    fn orbit_positions(r: &ShapeRenderer<RecordingBackend>) -> Vec<[f32; 2]> {
        let b = r.batches().get(ORBIT).unwrap();
        r.arena().vertices()[b.vertex_offset..b.vertex_end()]
            .iter()
            .map(|v| v.position)
            .collect()
    }

    #[test]
    fn build_fills_every_shape_kind() {
        let mut r = renderer();
        Scene::new().build(&mut r);
        for kind in [ShapeKind::Grid, ShapeKind::Line, ShapeKind::Circle, ShapeKind::Polygon] {
            assert!(r.has_kind(kind), "{kind:?} missing");
        }
        assert_eq!(r.batches().get(ORBIT).unwrap().vertex_count, 3 * ORBIT_RADII.len());
    }

    #[test]
    fn grid_can_be_hidden() {
        let mut r = renderer();
        let scene = Scene { show_grid: false, ..Scene::new() };
        scene.build(&mut r);
        assert!(!r.has_kind(ShapeKind::Grid));
    }

    #[test]
    fn animate_rotates_orbit_about_origin() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.build(&mut r);

        let dt = std::f64::consts::FRAC_PI_2 / ORBIT_SPEED;
        scene.animate(&mut r, dt);

        // The first circle starts on +X, so a quarter turn puts it on +Y.
        let first = &orbit_positions(&r)[..3];
        for &[x, y] in first {
            assert!(x.abs() < 1e-3, "x = {x}");
            assert!((y - ORBIT_RADII[0] as f32).abs() < 1e-3, "y = {y}");
        }
        assert!((scene.orbit_angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn animate_leaves_other_batches_alone() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.build(&mut r);
        let shared = *r.batches().get(BatchKey::CIRCLE).unwrap();
        let before = r.arena().vertices()[shared.vertex_offset..shared.vertex_end()].to_vec();

        scene.animate(&mut r, 0.25);
        assert_eq!(&r.arena().vertices()[shared.vertex_offset..shared.vertex_end()], &before[..]);
    }

    #[test]
    fn rebuild_keeps_orbit_where_it_was() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.build(&mut r);
        scene.animate(&mut r, 1.0);
        let before = orbit_positions(&r);

        r.clear();
        scene.build(&mut r);
        let after = orbit_positions(&r);
        for (a, b) in before.iter().zip(&after) {
            assert!((a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3);
        }
    }

    #[test]
    fn animate_without_orbit_is_a_no_op() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.animate(&mut r, 0.5);
        assert_eq!(scene.orbit_angle(), 0.0);
    }
}
