use nexus_math::Vec3;

/// Linear and angular motion state.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RigidBody {
    /// Linear velocity, units/s
    pub velocity: Vec3,
    /// Linear acceleration, units/s^2
    pub acceleration: Vec3,
    /// Angular velocity around each axis, radians/s
    pub angular_velocity: Vec3,
}
