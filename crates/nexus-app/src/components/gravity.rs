use nexus_math::Vec3;

/// Constant gravitational acceleration applied by the physics system.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Gravity {
    /// Acceleration vector, units/s^2
    pub force: Vec3,
}
