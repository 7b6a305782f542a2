use crate::components::Transform;
use nexus_math::{radians, Mat4, Vec3};

/// Perspective camera parameters and movement tuning.
///
/// The camera's pose lives in its [`Transform`]; this component holds the
/// lens and the control speeds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraLens {
    /// Vertical field of view, degrees
    pub fov_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Movement speed, units/s
    pub speed: f32,
    /// Mouse-look sensitivity multiplier
    pub sensitivity: f32,
}

impl CameraLens {
    /// World up direction.
    pub const WORLD_UP: Vec3 = Vec3::Y;

    /// Forward direction of an unrotated camera.
    pub const FRONT: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    /// View matrix for a camera posed at `transform`.
    pub fn view_matrix(&self, transform: &Transform) -> Mat4 {
        let front = transform.rotation * Self::FRONT;
        Mat4::look_at(
            transform.position,
            transform.position + front,
            Self::WORLD_UP,
        )
    }

    /// Projection matrix for a viewport of `width` x `height` pixels.
    pub fn projection_matrix(&self, width: f32, height: f32) -> Mat4 {
        Mat4::perspective(radians(self.fov_degrees), width / height, self.near, self.far)
    }
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
            speed: 20.0,
            sensitivity: 1.0,
        }
    }
}
