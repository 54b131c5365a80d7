/// Straight-alpha RGBA color with every component normalized to `[0, 1]`.
///
/// This is the only color representation the shape API accepts. Colors given
/// on the 0–255 channel scale are converted at the API edge with
/// [`from_rgb255`](Self::from_rgb255); the encoders never rescale.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from components that are already in `[0, 1]`.
    ///
    /// No validation; use [`clamped`](Self::clamped) for untrusted input.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from normalized components, clamping each into `[0, 1]`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(r, g, b, a).clamped()
    }

    /// Converts the `[r, g, b] in 0..=255, a in 0..=1` convention.
    ///
    /// `from_rgb255(255.0, 0.0, 0.0, 1.0)` is opaque red `(1, 0, 0, 1)`.
    #[inline]
    pub fn from_rgb255(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(r / 255.0, g / 255.0, b / 255.0, a)
    }

    /// Creates a color from 8-bit channels, alpha included.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps every channel to `[0, 1]`; NaN becomes 0.
    #[inline]
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self {
            r: unit(self.r),
            g: unit(self.g),
            b: unit(self.b),
            a: unit(self.a),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb255_scales_channels_but_not_alpha() {
        assert_eq!(Color::from_rgb255(255.0, 0.0, 0.0, 1.0), Color::rgba(1.0, 0.0, 0.0, 1.0));
        let c = Color::from_rgb255(51.0, 102.0, 255.0, 0.5);
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.g - 0.4).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn new_clamps_out_of_range_components() {
        let c = Color::new(1.5, -0.25, f32::NAN, 2.0);
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn rgba8_normalizes_alpha_too() {
        let c = Color::from_rgba8(255, 0, 255, 0);
        assert_eq!(c.to_array(), [1.0, 0.0, 1.0, 0.0]);
    }
}
