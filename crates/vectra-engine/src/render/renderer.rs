use crate::coords::{CoordinateState, CoordinateSystem, Vec2, ViewError, Viewport, DEFAULT_ZOOM_FACTOR};
use crate::paint::Color;

use super::backend::GpuBackend;
use super::batch::{
    BatchKey, BatchRegistry, ShapeKind, Topology, VertexIndexArena, DEFAULT_INDICES,
    DEFAULT_VERTEX_RECORDS,
};
use super::shapes::{self, Geometry, GridStyle};
use super::vertex::Vertex;

/// What [`ShapeRenderer::begin_frame`] does with last frame's shapes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FramePolicy {
    /// Drop everything; the caller re-submits the scene each frame.
    #[default]
    Rebuild,
    /// Keep shapes until [`ShapeRenderer::clear`] is called.
    Accumulate,
}

/// Renderer construction parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EngineConfig {
    pub initial_vertex_records: usize,
    pub initial_indices: usize,
    pub background: Color,
    pub zoom_factor: f64,
    pub frame_policy: FramePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_vertex_records: DEFAULT_VERTEX_RECORDS,
            initial_indices: DEFAULT_INDICES,
            background: Color::BLACK,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            frame_policy: FramePolicy::Rebuild,
        }
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub indices: usize,
}

/// Batched 2D shape renderer.
///
/// Owns the view transform, the CPU geometry arena, the batch registry and a
/// [`GpuBackend`]. Shapes are appended in data space, grouped into batches by
/// key, and drawn with one indexed call per key.
///
/// Order matters: capacity is ensured (and forwarded to the backend) before
/// records are written, and a batch exists before anything accumulates into it.
pub struct ShapeRenderer<B: GpuBackend> {
    backend: B,
    coords: CoordinateSystem,
    arena: VertexIndexArena,
    batches: BatchRegistry,
    background: Color,
    frame_policy: FramePolicy,
    /// Arena contents not yet uploaded by `flush`.
    dirty: bool,
}

impl<B: GpuBackend> ShapeRenderer<B> {
    pub fn new(backend: B, viewport: Viewport, config: EngineConfig) -> Result<Self, ViewError> {
        let mut coords = CoordinateSystem::new(viewport)?;
        coords.set_zoom_factor(config.zoom_factor)?;

        let mut r = Self {
            backend,
            coords,
            arena: VertexIndexArena::new(config.initial_vertex_records, config.initial_indices),
            batches: BatchRegistry::new(),
            background: config.background,
            frame_policy: config.frame_policy,
            dirty: false,
        };

        r.backend.resize_vertex_storage(r.arena.vertex_byte_capacity());
        r.backend.resize_index_storage(r.arena.index_byte_capacity());
        r.sync_projection();
        Ok(r)
    }

    // ── shapes ─────────────────────────────────────────────────────────────

    /// Adds a line segment to the shared line batch. `width` is in data units.
    pub fn add_line(&mut self, a: Vec2, b: Vec2, width: f64, color: Color) -> bool {
        self.add_line_in(BatchKey::LINE, a, b, width, color)
    }

    pub fn add_line_in(&mut self, key: BatchKey, a: Vec2, b: Vec2, width: f64, color: Color) -> bool {
        self.emit(key, shapes::line::encode(a, b, width, color))
    }

    /// Adds a filled circle to the shared circle batch.
    pub fn add_circle(&mut self, center: Vec2, radius: f64, color: Color) -> bool {
        self.add_circle_in(BatchKey::CIRCLE, center, radius, color)
    }

    pub fn add_circle_in(&mut self, key: BatchKey, center: Vec2, radius: f64, color: Color) -> bool {
        self.emit(key, shapes::circle::encode(center, radius, color))
    }

    /// Adds a filled polygon to the shared polygon batch.
    pub fn add_polygon(&mut self, points: &[Vec2], color: Color) -> bool {
        self.add_polygon_in(BatchKey::POLYGON, points, color)
    }

    pub fn add_polygon_in(&mut self, key: BatchKey, points: &[Vec2], color: Color) -> bool {
        self.emit(key, shapes::polygon::encode(points, color))
    }

    /// Adds a dot grid over the current visible area to the shared grid batch.
    pub fn add_grid(&mut self, style: &GridStyle) -> bool {
        self.add_grid_in(BatchKey::GRID, style)
    }

    pub fn add_grid_in(&mut self, key: BatchKey, style: &GridStyle) -> bool {
        self.emit(key, shapes::grid::encode(style, &self.coords))
    }

    /// Rewrites every position stored under `key` and re-uploads the touched ranges.
    ///
    /// `transform` sees the positions of all of the key's batches in
    /// submission order. Returns `false` (and does nothing) for unknown keys.
    pub fn update_batch_positions(&mut self, key: BatchKey, transform: impl FnOnce(&mut [Vec2])) -> bool {
        let runs: Vec<(usize, usize)> = self
            .batches
            .runs_for(key)
            .map(|b| (b.vertex_offset, b.vertex_end()))
            .collect();
        if runs.is_empty() {
            log::trace!("position update for unknown batch {key:?} ignored");
            return false;
        }

        let all = self.arena.vertices();
        let mut positions: Vec<Vec2> = runs
            .iter()
            .flat_map(|&(start, end)| &all[start..end])
            .map(|v| Vec2::new(v.position[0] as f64, v.position[1] as f64))
            .collect();

        transform(&mut positions);

        let vertices = self.arena.vertices_mut();
        let mut moved = positions.into_iter();
        for &(start, end) in &runs {
            for v in &mut vertices[start..end] {
                if let Some(p) = moved.next() {
                    v.position = p.to_f32();
                }
            }
        }

        for &(start, end) in &runs {
            let bytes: &[u8] = bytemuck::cast_slice(&self.arena.vertices()[start..end]);
            self.backend.update_vertex_range(bytes, start as u64 * Vertex::STRIDE);
        }
        true
    }

    fn emit(&mut self, key: BatchKey, geometry: Option<Geometry>) -> bool {
        let Some(g) = geometry else { return false };
        if g.is_empty() {
            return false;
        }

        if let Some(bytes) = self.arena.ensure_vertex_capacity(g.records.len()) {
            self.backend.resize_vertex_storage(bytes);
        }
        if let Some(bytes) = self.arena.ensure_index_capacity(g.indices.len()) {
            self.backend.resize_index_storage(bytes);
        }

        self.batches.get_or_create(key, Topology::Triangles, self.arena.marks());

        let base = self.arena.vertex_len() as u32;
        self.arena.append_vertices(&g.records);
        self.arena.append_indices(g.indices.iter().map(|&i| base + i));
        self.batches.accumulate(key, g.records.len(), g.indices.len());
        self.dirty = true;

        log::trace!("{key:?}: +{} records, +{} indices", g.records.len(), g.indices.len());
        true
    }

    // ── view ───────────────────────────────────────────────────────────────

    pub fn set_coordinate_system(&mut self, unit_size: f64, scale: f64, pan_x: f64, pan_y: f64) -> Result<(), ViewError> {
        self.coords.set(unit_size, scale, pan_x, pan_y)?;
        self.sync_projection();
        Ok(())
    }

    pub fn set_zoom_factor(&mut self, factor: f64) -> Result<(), ViewError> {
        self.coords.set_zoom_factor(factor)
    }

    /// Shifts the view by a data-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.coords.pan(dx, dy);
        self.sync_projection();
    }

    /// One zoom step about the data point `center`.
    pub fn zoom(&mut self, zoom_in: bool, center: Vec2) {
        self.coords.zoom(zoom_in, center);
        self.sync_projection();
    }

    pub fn reset_view(&mut self) {
        self.coords.reset_view();
        self.sync_projection();
    }

    /// Records a new surface rectangle (logical pixels). Empty surfaces are
    /// ignored and the last projection stays on the GPU.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.coords.resize(viewport) {
            self.sync_projection();
        }
    }

    #[inline]
    pub fn screen_to_data(&self, screen: Vec2) -> Vec2 {
        self.coords.screen_to_data(screen)
    }

    #[inline]
    pub fn data_to_screen(&self, data: Vec2) -> Vec2 {
        self.coords.data_to_screen(data)
    }

    #[inline]
    pub fn coordinate_state(&self) -> CoordinateState {
        self.coords.state()
    }

    #[inline]
    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coords
    }

    fn sync_projection(&mut self) {
        self.backend.set_view_projection(self.coords.projection());
    }

    // ── frame ──────────────────────────────────────────────────────────────

    /// Uploads the used prefix of both buffers. Nothing is sent when empty.
    ///
    /// Indices go up grouped by key, so a key interrupted by other keys still
    /// draws with one call.
    pub fn flush(&mut self) {
        self.dirty = false;
        if self.arena.vertex_len() == 0 {
            return;
        }
        self.backend
            .update_vertex_range(bytemuck::cast_slice(self.arena.vertices()), 0);
        if self.arena.index_len() == 0 {
            return;
        }
        if self.batches.is_interleaved() {
            let grouped = self.batches.grouped_indices(self.arena.indices());
            self.backend.update_index_range(bytemuck::cast_slice(&grouped), 0);
        } else {
            self.backend
                .update_index_range(bytemuck::cast_slice(self.arena.indices()), 0);
        }
    }

    pub fn render(&mut self) -> FrameStats {
        self.render_with(|_| {})
    }

    /// Clears to the background, runs `update`, then draws every key in
    /// first-registration order. Keys without indices are skipped.
    pub fn render_with(&mut self, update: impl FnOnce(&mut Self)) -> FrameStats {
        self.backend.clear_surface(self.background);
        update(self);

        if self.dirty {
            self.flush();
        }

        let mut stats = FrameStats::default();
        for call in self.batches.draw_calls() {
            if call.index_count == 0 {
                continue;
            }
            self.backend
                .draw_indexed(call.topology, call.index_count as u32, call.index_byte_offset());
            stats.draw_calls += 1;
            stats.indices += call.index_count;
        }
        stats
    }

    /// Drops every shape. Capacity (CPU and GPU) is kept.
    pub fn clear(&mut self) {
        self.arena.reset();
        self.batches.clear();
        self.dirty = false;
    }

    /// Applies the frame policy: clears under [`FramePolicy::Rebuild`].
    pub fn begin_frame(&mut self) {
        if self.frame_policy == FramePolicy::Rebuild {
            self.clear();
        }
    }

    #[inline]
    pub fn frame_policy(&self) -> FramePolicy {
        self.frame_policy
    }

    pub fn set_frame_policy(&mut self, policy: FramePolicy) {
        self.frame_policy = policy;
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    // ── accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[inline]
    pub fn arena(&self) -> &VertexIndexArena {
        &self.arena
    }

    #[inline]
    pub fn batches(&self) -> &BatchRegistry {
        &self.batches
    }

    /// Whether any batch of `kind` holds geometry.
    pub fn has_kind(&self, kind: ShapeKind) -> bool {
        self.batches.iter().any(|b| b.key.kind == kind && b.index_count > 0)
    }
}
