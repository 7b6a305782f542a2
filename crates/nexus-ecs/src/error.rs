use crate::entity::Entity;
use crate::limits::MAX_COMPONENTS;
use crate::system::SystemId;

/// Convenience alias for fallible ECS operations.
pub type EcsResult<T> = std::result::Result<T, EcsError>;

/// Errors produced by ECS operations.
///
/// Every precondition of the runtime surfaces as a variant here; no
/// operation panics on misuse.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The configured entity ceiling was reached
    #[error("entity limit reached ({0} live entities)")]
    EntityLimit(u32),

    /// The entity is not alive (never allocated, already despawned, or out
    /// of range)
    #[error("entity {0} is not alive")]
    DeadEntity(Entity),

    /// The component type was never registered with the world
    #[error("component type `{0}` is not registered")]
    UnregisteredComponent(&'static str),

    /// The component type was registered twice
    #[error("component type `{0}` is already registered")]
    ComponentAlreadyRegistered(&'static str),

    /// All signature bits are taken
    #[error("component bit space exhausted ({MAX_COMPONENTS} types)")]
    ComponentBitsExhausted,

    /// The entity already carries a component of this type
    #[error("entity {0} already has a `{1}` component")]
    DuplicateComponent(Entity, &'static str),

    /// The entity carries no component of this type
    #[error("entity {0} has no `{1}` component")]
    MissingComponent(Entity, &'static str),

    /// No system is registered under this id
    #[error("unknown system id {0}")]
    UnknownSystem(SystemId),

    /// A system returned an error during [`World::update`](crate::World::update)
    #[error("system `{system}` failed: {source}")]
    SystemFailed {
        /// Name of the failing system
        system: String,
        /// The error the system returned
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
