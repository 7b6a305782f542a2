//! Unit quaternions for 3D rotations

use crate::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A rotation quaternion (`x`, `y`, `z` imaginary parts, `w` real part).
///
/// Only unit quaternions represent rotations; the builders here produce
/// normalized values, and long chains of multiplications should be
/// re-normalized now and then to keep drift in check.
///
/// Serializes as `[x, y, z, w]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quat {
    /// Imaginary X part
    pub x: f32,
    /// Imaginary Y part
    pub y: f32,
    /// Imaginary Z part
    pub z: f32,
    /// Real part
    pub w: f32,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a quaternion from raw components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis` (normalized internally).
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        let (sin, cos) = (angle * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Rotation from euler angles in radians: `pitch` around X, `yaw`
    /// around Y, `roll` around Z.
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sr, cr) = (roll * 0.5).sin_cos();

        Self::new(
            sp * cy * cr - cp * sy * sr,
            cp * sy * cr + sp * cy * sr,
            cp * cy * sr - sp * sy * cr,
            cp * cy * cr + sp * sy * sr,
        )
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Quaternion magnitude.
    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit quaternion in the same orientation, or identity for a
    /// degenerate (near-zero) input.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    /// The inverse rotation (for unit quaternions).
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 4]> for Quat {
    #[inline]
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<Quat> for [f32; 4] {
    #[inline]
    fn from(q: Quat) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product: `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;

    /// Rotate a vector by this quaternion.
    fn mul(self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2(q x (q x v))
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(Quat::IDENTITY * v, v);
        assert_vec_eq(Quat::from_euler(0.0, 0.0, 0.0) * v, v);
    }

    #[test]
    fn test_axis_angle_quarter_turn() {
        let q = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        // +Z rotates to +X around +Y
        assert_vec_eq(q * Vec3::Z, Vec3::X);
        assert_vec_eq(q * Vec3::X, -Vec3::Z);
    }

    #[test]
    fn test_euler_matches_axis_angle() {
        let yaw = 0.7;
        let from_euler = Quat::from_euler(0.0, yaw, 0.0);
        let from_axis = Quat::from_axis_angle(Vec3::Y, yaw);
        assert!((from_euler.dot(from_axis).abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_conjugate_inverts() {
        let q = Quat::from_euler(0.3, 0.5, 0.1);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_vec_eq(q.conjugate() * (q * v), v);
        let round_trip = q * q.conjugate();
        assert!((round_trip.dot(Quat::IDENTITY) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_degenerate() {
        let q = Quat::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn test_composition_order() {
        // yaw then pitch, applied right-to-left
        let pitch = Quat::from_axis_angle(Vec3::X, 0.4);
        let yaw = Quat::from_axis_angle(Vec3::Y, 1.1);
        let composed = yaw * pitch;
        let v = Vec3::new(0.0, 0.0, -1.0);
        assert_vec_eq(composed * v, yaw * (pitch * v));
    }
}
