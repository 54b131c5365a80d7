use super::Vec2;

/// Screen rectangle occupied by the rendering surface, in logical pixels.
///
/// `origin` is the surface's top-left corner in the coordinate space pointer
/// events are reported in (usually `(0, 0)` for a window-filling surface).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { origin: Vec2::zero(), width, height }
    }

    #[inline]
    pub const fn with_origin(origin: Vec2, width: f64, height: f64) -> Self {
        Self { origin, width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Screen position of the surface middle.
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.origin.x + self.width * 0.5,
            self.origin.y + self.height * 0.5,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
