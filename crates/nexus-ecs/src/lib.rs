//! Nexus ECS Core
//!
//! This crate provides the entity-component-system runtime:
//! - Entity allocation with FIFO id recycling (`entity` module)
//! - Densely packed per-type component storage (`component` module)
//! - Bitset signatures for component-membership matching (`signature` module)
//! - System registration and per-frame dispatch (`system` module)
//! - The [`World`] facade tying them together (`world` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use nexus_ecs::{Limits, System, SystemResult, World};
//!
//! let mut world = World::new(Limits::default());
//! world.register_component::<Position>()?;
//! world.register_component::<Velocity>()?;
//! world.register_system_for::<(Position, Velocity)>(Integrator)?;
//!
//! let entity = world.spawn()?;
//! world.add_component(entity, Position::default())?;
//! world.add_component(entity, Velocity::default())?;
//!
//! world.update(frame_clock.tick())?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod clock;
pub mod component;
pub mod entity;
pub mod limits;
pub mod signature;
pub mod system;
pub mod world;

mod error;

pub use clock::FrameClock;
pub use component::{Component, ComponentArray, ComponentRegistry, ComponentSet};
pub use entity::{Entity, EntityAllocator};
pub use error::{EcsError, EcsResult};
pub use limits::{Limits, MAX_COMPONENTS};
pub use signature::Signature;
pub use system::{System, SystemId, SystemManager, SystemResult};
pub use world::World;
