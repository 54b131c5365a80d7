use bytemuck::{Pod, Zeroable};

use super::Vec2;

/// Column-major 4x4 matrix, laid out the way WGSL `mat4x4<f32>` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Orthographic projection mapping the box `[left, right] x [bottom, top] x [near, far]`
    /// onto `[-1, 1]^3` (OpenGL convention, +Y up).
    ///
    /// Computed in `f64` and narrowed once.
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        Mat4 {
            cols: [
                [(-2.0 * lr) as f32, 0.0, 0.0, 0.0],
                [0.0, (-2.0 * bt) as f32, 0.0, 0.0],
                [0.0, 0.0, (2.0 * nf) as f32, 0.0],
                [
                    ((left + right) * lr) as f32,
                    ((top + bottom) * bt) as f32,
                    ((far + near) * nf) as f32,
                    1.0,
                ],
            ],
        }
    }

    /// Applies the matrix to `(p.x, p.y, 0, 1)` and returns the resulting x/y.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let c = &self.cols;
        let x = c[0][0] as f64 * p.x + c[1][0] as f64 * p.y + c[3][0] as f64;
        let y = c[0][1] as f64 * p.x + c[1][1] as f64 * p.y + c[3][1] as f64;
        Vec2::new(x, y)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
