//! The world facade
//!
//! [`World`] owns the entity allocator, the component registry, and the
//! system manager, and keeps the three views consistent: an entity's
//! signature always mirrors its stored components, and system memberships
//! always mirror signatures.

use crate::component::{Component, ComponentRegistry, ComponentSet};
use crate::entity::{Entity, EntityAllocator};
use crate::error::{EcsError, EcsResult};
use crate::limits::Limits;
use crate::signature::Signature;
use crate::system::{System, SystemId, SystemManager};
use std::collections::BTreeSet;
use std::time::Duration;

/// Central ECS state: entities, components, and systems.
pub struct World {
    entities: EntityAllocator,
    components: ComponentRegistry,
    systems: SystemManager,
}

impl World {
    /// Empty world with the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            entities: EntityAllocator::new(limits),
            components: ComponentRegistry::new(),
            systems: SystemManager::new(),
        }
    }

    // entity operations
    // -----------------

    /// Allocate a new entity with an empty signature.
    pub fn spawn(&mut self) -> EcsResult<Entity> {
        let entity = self.entities.allocate()?;
        // seed membership so empty-signature systems see bare entities
        self.systems.entity_signature_changed(entity, Signature::EMPTY);
        Ok(entity)
    }

    /// Destroy an entity: drops its components, clears its memberships,
    /// and recycles its id.
    pub fn despawn(&mut self, entity: Entity) -> EcsResult<()> {
        self.entities.deallocate(entity)?;
        self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        Ok(())
    }

    /// Whether the entity is currently live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> u32 {
        self.entities.live_count()
    }

    /// The entity's current signature.
    pub fn signature(&self, entity: Entity) -> EcsResult<Signature> {
        self.entities.signature(entity)
    }

    /// The limits this world was built with.
    pub fn limits(&self) -> Limits {
        self.entities.limits()
    }

    // component operations
    // --------------------

    /// Register a component type, assigning it the next signature bit.
    pub fn register_component<T: Component>(&mut self) -> EcsResult<Signature> {
        self.components.register::<T>()
    }

    /// Attach a component to an entity and re-evaluate system membership.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> EcsResult<()> {
        let bit = self.components.signature_bit::<T>()?;
        let mut signature = self.entities.signature(entity)?;

        self.components.array_mut::<T>()?.insert(entity, component)?;

        signature.insert(bit);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);

        Ok(())
    }

    /// Detach and return a component, re-evaluating system membership.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> EcsResult<T> {
        let bit = self.components.signature_bit::<T>()?;
        let mut signature = self.entities.signature(entity)?;

        let component = self.components.array_mut::<T>()?.remove(entity)?;

        signature.remove(bit);
        self.entities.set_signature(entity, signature)?;
        self.systems.entity_signature_changed(entity, signature);

        Ok(component)
    }

    /// Borrow an entity's component.
    pub fn component<T: Component>(&self, entity: Entity) -> EcsResult<&T> {
        self.components.array::<T>()?.get(entity)
    }

    /// Mutably borrow an entity's component.
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> EcsResult<&mut T> {
        self.components.array_mut::<T>()?.get_mut(entity)
    }

    /// Borrow an entity's component, or `None` when the type is
    /// unregistered or the entity lacks it.
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.component(entity).ok()
    }

    /// Mutable variant of [`try_component`](Self::try_component).
    pub fn try_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.component_mut(entity).ok()
    }

    /// Whether the entity carries a component of this type.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components
            .array::<T>()
            .map(|array| array.contains(entity))
            .unwrap_or(false)
    }

    /// Combined signature of a component tuple.
    pub fn signature_of<S: ComponentSet>(&self) -> EcsResult<Signature> {
        S::signature(&self.components)
    }

    /// Direct access to the component registry.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    // system operations
    // -----------------

    /// Register a system interested in the component tuple `S`.
    pub fn register_system_for<S: ComponentSet>(
        &mut self,
        system: impl System + 'static,
    ) -> EcsResult<SystemId> {
        let signature = self.signature_of::<S>()?;
        self.register_system(system, signature)
    }

    /// Register a system with an explicit signature.
    ///
    /// Membership is backfilled from the already-live entities, so systems
    /// may be registered after spawning.
    pub fn register_system(
        &mut self,
        system: impl System + 'static,
        signature: Signature,
    ) -> EcsResult<SystemId> {
        let id = self.systems.register(Box::new(system), signature);

        let matching: Vec<(Entity, Signature)> = self
            .entities
            .live_entities()
            .filter_map(|entity| {
                self.entities
                    .signature(entity)
                    .ok()
                    .map(|signature| (entity, signature))
            })
            .collect();
        for (entity, entity_signature) in matching {
            self.systems
                .entity_signature_changed(entity, entity_signature);
        }

        Ok(id)
    }

    /// The current membership of a system.
    pub fn system_entities(&self, id: SystemId) -> EcsResult<&BTreeSet<Entity>> {
        self.systems.entities(id)
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run every system once, in registration order.
    ///
    /// Each system receives the membership snapshot taken at the start of
    /// its own turn; mutations land immediately, so later systems in the
    /// same frame observe them.
    pub fn update(&mut self, dt: Duration) -> EcsResult<()> {
        for index in 0..self.systems.slot_count() {
            let Some((_, name, mut system, snapshot)) = self.systems.begin_run(index) else {
                continue;
            };

            let result = system.run(self, &snapshot, dt);
            self.systems.finish_run(index, system);

            result.map_err(|source| EcsError::SystemFailed {
                system: name,
                source,
            })?;
        }

        Ok(())
    }
}
