use thiserror::Error;

use super::{Mat4, Rect, Vec2, Viewport};

/// Lower bound of the zoom scale.
pub const MIN_SCALE: f64 = 0.1;
/// Upper bound of the zoom scale.
pub const MAX_SCALE: f64 = 10.0;
/// Scale multiplier applied per zoom step unless configured otherwise.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.1;

/// Rejected view configuration.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("zoom factor must be finite and greater than 1.0 (got {0})")]
    InvalidZoomFactor(f64),
    #[error("unit size must be finite and positive (got {0})")]
    InvalidUnitSize(f64),
    #[error("viewport must have a finite, positive size (got {width}x{height})")]
    InvalidViewport { width: f64, height: f64 },
}

/// Snapshot of the view parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateState {
    /// Screen pixels per data unit at `scale == 1`.
    pub unit_size: f64,
    /// Zoom scale, always within `[MIN_SCALE, MAX_SCALE]`.
    pub scale: f64,
    /// Data-space point shown at the surface center.
    pub pan_x: f64,
    pub pan_y: f64,
    /// Multiplier applied per zoom step (> 1).
    pub zoom_factor: f64,
}

impl CoordinateState {
    /// Screen pixels per data unit.
    #[inline]
    pub fn effective_scale(&self) -> f64 {
        self.unit_size * self.scale
    }
}

impl Default for CoordinateState {
    fn default() -> Self {
        Self {
            unit_size: 1.0,
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

/// Data <-> screen mapping for one rendering surface.
///
/// Screen space: logical pixels, +Y down, origin at `viewport.origin`.
/// Data space: +Y up, `(pan_x, pan_y)` at the surface center.
///
/// Every mutator recomputes the cached projection; callers forward
/// [`projection`](Self::projection) to the GPU afterwards. The viewport is
/// always valid, so the projection is always finite.
#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    state: CoordinateState,
    viewport: Viewport,
    projection: Mat4,
}

impl CoordinateSystem {
    pub fn new(viewport: Viewport) -> Result<Self, ViewError> {
        if !viewport.is_valid() {
            return Err(ViewError::InvalidViewport { width: viewport.width, height: viewport.height });
        }
        let mut cs = Self {
            state: CoordinateState::default(),
            viewport,
            projection: Mat4::IDENTITY,
        };
        cs.recompute();
        Ok(cs)
    }

    #[inline]
    pub fn state(&self) -> CoordinateState {
        self.state
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Replaces unit size, scale and pan. `scale` is clamped into range.
    pub fn set(&mut self, unit_size: f64, scale: f64, pan_x: f64, pan_y: f64) -> Result<(), ViewError> {
        if !unit_size.is_finite() || unit_size <= 0.0 {
            return Err(ViewError::InvalidUnitSize(unit_size));
        }
        self.state.unit_size = unit_size;
        self.state.scale = clamp_scale(scale);
        self.state.pan_x = pan_x;
        self.state.pan_y = pan_y;
        self.recompute();
        Ok(())
    }

    pub fn set_zoom_factor(&mut self, factor: f64) -> Result<(), ViewError> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ViewError::InvalidZoomFactor(factor));
        }
        self.state.zoom_factor = factor;
        Ok(())
    }

    /// Shifts the view by a data-space delta.
    ///
    /// Screen drags convert with `delta_px / effective_scale`, negating X
    /// (content follows the pointer) but not Y (screen Y points down).
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.state.pan_x += dx;
        self.state.pan_y += dy;
        self.recompute();
    }

    /// Zooms one step about the data point `center`, which keeps its screen position.
    pub fn zoom(&mut self, zoom_in: bool, center: Vec2) {
        let old = self.state.scale;
        let factor = if zoom_in {
            self.state.zoom_factor
        } else {
            1.0 / self.state.zoom_factor
        };
        let new = clamp_scale(old * factor);
        let ratio = new / old;

        self.state.scale = new;
        self.state.pan_x = center.x + (self.state.pan_x - center.x) / ratio;
        self.state.pan_y = center.y + (self.state.pan_y - center.y) / ratio;
        self.recompute();
    }

    /// Pan back to the origin and scale back to 1; unit size is kept.
    pub fn reset_view(&mut self) {
        self.state.pan_x = 0.0;
        self.state.pan_y = 0.0;
        self.state.scale = 1.0;
        self.recompute();
    }

    /// Adopts a new surface size. Empty or non-finite sizes (a minimized
    /// window) are ignored and the last projection stays; returns whether the
    /// viewport was taken.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_valid() {
            log::debug!("ignoring {}x{} viewport", viewport.width, viewport.height);
            return false;
        }
        self.viewport = viewport;
        self.recompute();
        true
    }

    pub fn screen_to_data(&self, screen: Vec2) -> Vec2 {
        let k = self.state.effective_scale();
        let c = self.viewport.center();
        Vec2::new(
            (screen.x - c.x) / k + self.state.pan_x,
            -(screen.y - c.y) / k + self.state.pan_y,
        )
    }

    pub fn data_to_screen(&self, data: Vec2) -> Vec2 {
        let k = self.state.effective_scale();
        let c = self.viewport.center();
        Vec2::new(
            (data.x - self.state.pan_x) * k + c.x,
            -(data.y - self.state.pan_y) * k + c.y,
        )
    }

    /// Data-space rectangle covered by the surface.
    pub fn visible_bounds(&self) -> Rect {
        let (hw, hh) = self.half_extents();
        Rect::new(
            Vec2::new(self.state.pan_x - hw, self.state.pan_y - hh),
            Vec2::new(self.state.pan_x + hw, self.state.pan_y + hh),
        )
    }

    fn half_extents(&self) -> (f64, f64) {
        let k = self.state.effective_scale();
        (self.viewport.width / (2.0 * k), self.viewport.height / (2.0 * k))
    }

    fn recompute(&mut self) {
        let (hw, hh) = self.half_extents();
        let (px, py) = (self.state.pan_x, self.state.pan_y);
        self.projection = Mat4::ortho(-hw + px, hw + px, -hh + py, hh + py, -1.0, 1.0);
    }
}

#[inline]
fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return 1.0;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}
