use nexus_math::Vec3;

/// Marks an entity for drawing and carries its material color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Renderable {
    /// RGB color, each channel in [0, 1]
    pub color: Vec3,
}
