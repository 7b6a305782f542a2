use nexus_math::Vec3;

/// Extra propulsion force, consumed by the physics system when present.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Thrust {
    /// Acceleration vector, units/s^2
    pub force: Vec3,
}
