//! Resource ceilings for a [`World`](crate::World)

/// Number of distinct component types a world can register.
///
/// Fixed by the width of [`Signature`](crate::Signature)'s backing integer.
pub const MAX_COMPONENTS: u32 = 32;

/// Resource limits applied at world construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of simultaneously live entities
    pub max_entities: u32,
}

impl Limits {
    /// Default entity ceiling.
    pub const DEFAULT_MAX_ENTITIES: u32 = 5000;

    /// Limits with a custom entity ceiling.
    pub fn with_max_entities(max_entities: u32) -> Self {
        Self { max_entities }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_entities: Self::DEFAULT_MAX_ENTITIES,
        }
    }
}
