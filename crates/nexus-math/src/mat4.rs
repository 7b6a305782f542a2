//! Column-major 4x4 matrices

use crate::{Quat, Vec3};
use std::ops::Mul;

/// A column-major 4x4 single-precision matrix.
///
/// `cols[c][r]` addresses column `c`, row `r`, matching the memory layout
/// OpenGL expects, so [`Mat4::to_cols_array`] can be fed straight to
/// `glUniformMatrix4fv` with `transpose = GL_FALSE`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    /// Matrix columns
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Translation matrix.
    pub fn from_translation(translation: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [translation.x, translation.y, translation.z, 1.0];
        m
    }

    /// Non-uniform scale matrix.
    pub fn from_scale(scale: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = scale.x;
        m.cols[1][1] = scale.y;
        m.cols[2][2] = scale.z;
        m
    }

    /// Rotation matrix from a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        let (x2, y2, z2) = (q.x + q.x, q.y + q.y, q.z + q.z);
        let (xx, yy, zz) = (q.x * x2, q.y * y2, q.z * z2);
        let (xy, xz, yz) = (q.x * y2, q.x * z2, q.y * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self {
            cols: [
                [1.0 - (yy + zz), xy + wz, xz - wy, 0.0],
                [xy - wz, 1.0 - (xx + zz), yz + wx, 0.0],
                [xz + wy, yz - wx, 1.0 - (xx + yy), 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Right-handed perspective projection with OpenGL clip space
    /// (z in [-1, 1]), looking down -Z.
    pub fn perspective(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y_radians * 0.5).tan();
        let mut m = Self::ZERO;
        m.cols[0][0] = f / aspect;
        m.cols[1][1] = f;
        m.cols[2][2] = (far + near) / (near - far);
        m.cols[2][3] = -1.0;
        m.cols[3][2] = (2.0 * far * near) / (near - far);
        m
    }

    /// Right-handed view matrix looking from `eye` toward `center`.
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let f = (center - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);

        Self {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    /// Transposed copy.
    pub fn transpose(self) -> Self {
        let mut m = Self::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                m.cols[c][r] = self.cols[r][c];
            }
        }
        m
    }

    /// Flattened column-major array, ready for uniform upload.
    pub fn to_cols_array(self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for c in 0..4 {
            out[c * 4..c * 4 + 4].copy_from_slice(&self.cols[c]);
        }
        out
    }

    const ZERO: Self = Self {
        cols: [[0.0; 4]; 4],
    };
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut m = Self::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                m.cols[c][r] = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        m
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    /// Transform a point (w = 1). The result drops the w component.
    fn mul(self, v: Vec3) -> Vec3 {
        let m = &self.cols;
        Vec3::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0],
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1],
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2],
        )
    }
}
