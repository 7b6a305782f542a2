use nexus_math::{Mat4, Quat, Vec3};

/// Position, scale, and orientation of an entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// World-space position
    pub position: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Orientation
    pub rotation: Quat,
}

impl Transform {
    /// Transform at `position` with unit scale and no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Model matrix: translation, then scale, then rotation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(self.scale)
            * Mat4::from_quat(self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
        }
    }
}
