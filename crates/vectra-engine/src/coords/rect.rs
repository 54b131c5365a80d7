use super::Vec2;

/// Axis-aligned rectangle in data space (+Y up), stored as min/max corners.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2 { Vec2::new(x, y) }

    #[test]
    fn extents_follow_corners() {
        let r = Rect::new(v(-4.0, -2.0), v(10.0, 6.0));
        assert_eq!(r.width(), 14.0);
        assert_eq!(r.height(), 8.0);
    }

    #[test]
    fn non_finite_corner_is_detected() {
        assert!(Rect::new(v(0.0, 0.0), v(1.0, 1.0)).is_finite());
        assert!(!Rect::new(v(f64::NEG_INFINITY, 0.0), v(1.0, 1.0)).is_finite());
        assert!(!Rect::new(v(0.0, 0.0), v(1.0, f64::NAN)).is_finite());
    }
}
