//! System registration and membership tracking

use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};
use crate::signature::Signature;
use crate::world::World;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// What a [`System::run`] returns.
///
/// Systems report domain-specific failures; the world wraps them in
/// [`EcsError::SystemFailed`] with the system's name attached.
pub type SystemResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// A unit of per-frame behavior over entities matching a signature.
///
/// Deliberately not `Send`: the frame loop is single-threaded and systems
/// may own thread-bound resources such as a GL context.
pub trait System {
    /// Name used in errors and diagnostics.
    fn name(&self) -> &str;

    /// Advance one frame.
    ///
    /// `entities` is the membership snapshot taken when this system's turn
    /// started; component and entity mutations made through `world` land
    /// immediately and are seen by systems that run later in the frame.
    fn run(&mut self, world: &mut World, entities: &BTreeSet<Entity>, dt: Duration)
        -> SystemResult;
}

/// Identifier of a registered system, assigned in registration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(u32);

impl SystemId {
    /// The raw id value.
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SystemSlot {
    id: SystemId,
    name: String,
    signature: Signature,
    entities: BTreeSet<Entity>,
    /// Detached while the system runs so it can borrow the world mutably
    system: Option<Box<dyn System>>,
}

/// Owns registered systems and keeps their entity memberships current.
#[derive(Default)]
pub struct SystemManager {
    slots: Vec<SystemSlot>,
}

impl SystemManager {
    /// Empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system with its interest signature.
    pub fn register(&mut self, system: Box<dyn System>, signature: Signature) -> SystemId {
        let id = SystemId(self.slots.len() as u32);
        self.slots.push(SystemSlot {
            id,
            name: system.name().to_owned(),
            signature,
            entities: BTreeSet::new(),
            system: Some(system),
        });
        id
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no systems are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The membership set of a system.
    pub fn entities(&self, id: SystemId) -> EcsResult<&BTreeSet<Entity>> {
        self.slots
            .get(id.0 as usize)
            .map(|slot| &slot.entities)
            .ok_or(EcsError::UnknownSystem(id))
    }

    /// The interest signature of a system.
    pub fn signature(&self, id: SystemId) -> EcsResult<Signature> {
        self.slots
            .get(id.0 as usize)
            .map(|slot| slot.signature)
            .ok_or(EcsError::UnknownSystem(id))
    }

    /// Drop the entity from every membership set.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for slot in &mut self.slots {
            slot.entities.remove(&entity);
        }
    }

    /// Re-evaluate the entity against every system's signature.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for slot in &mut self.slots {
            if signature.contains(slot.signature) {
                slot.entities.insert(entity);
            } else {
                slot.entities.remove(&entity);
            }
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Detach a system for its turn, along with a membership snapshot.
    ///
    /// Returns `None` for an index past the end or a slot already detached
    /// (a system re-entering the frame loop).
    pub(crate) fn begin_run(
        &mut self,
        index: usize,
    ) -> Option<(SystemId, String, Box<dyn System>, BTreeSet<Entity>)> {
        let slot = self.slots.get_mut(index)?;
        let system = slot.system.take()?;
        Some((slot.id, slot.name.clone(), system, slot.entities.clone()))
    }

    /// Reattach a system after its turn.
    pub(crate) fn finish_run(&mut self, index: usize, system: Box<dyn System>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.system = Some(system);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl System for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn run(
            &mut self,
            _world: &mut World,
            _entities: &BTreeSet<Entity>,
            _dt: Duration,
        ) -> SystemResult {
            Ok(())
        }
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut manager = SystemManager::new();
        let a = manager.register(Box::new(Noop), Signature::from_bit(0));
        let b = manager.register(Box::new(Noop), Signature::from_bit(1));

        assert_eq!(a.to_raw(), 0);
        assert_eq!(b.to_raw(), 1);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_membership_follows_signature() {
        let mut manager = SystemManager::new();
        let wants_01 = manager.register(Box::new(Noop), Signature::from_bits(0b11));
        let wants_1 = manager.register(Box::new(Noop), Signature::from_bit(1));

        let entity = Entity::from_raw(5);

        manager.entity_signature_changed(entity, Signature::from_bit(1));
        assert!(!manager.entities(wants_01).unwrap().contains(&entity));
        assert!(manager.entities(wants_1).unwrap().contains(&entity));

        manager.entity_signature_changed(entity, Signature::from_bits(0b11));
        assert!(manager.entities(wants_01).unwrap().contains(&entity));

        manager.entity_signature_changed(entity, Signature::EMPTY);
        assert!(!manager.entities(wants_01).unwrap().contains(&entity));
        assert!(!manager.entities(wants_1).unwrap().contains(&entity));
    }

    #[test]
    fn test_empty_signature_matches_everything() {
        let mut manager = SystemManager::new();
        let id = manager.register(Box::new(Noop), Signature::EMPTY);

        let entity = Entity::from_raw(0);
        manager.entity_signature_changed(entity, Signature::EMPTY);
        assert!(manager.entities(id).unwrap().contains(&entity));
    }

    #[test]
    fn test_entity_destroyed_clears_membership() {
        let mut manager = SystemManager::new();
        let id = manager.register(Box::new(Noop), Signature::EMPTY);

        let entity = Entity::from_raw(3);
        manager.entity_signature_changed(entity, Signature::EMPTY);
        manager.entity_destroyed(entity);
        assert!(manager.entities(id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_system_id() {
        let manager = SystemManager::new();
        assert!(matches!(
            manager.entities(SystemId(9)),
            Err(EcsError::UnknownSystem(_))
        ));
    }

    #[test]
    fn test_begin_run_detaches_once() {
        let mut manager = SystemManager::new();
        manager.register(Box::new(Noop), Signature::EMPTY);

        let (_, name, system, _) = manager.begin_run(0).unwrap();
        assert_eq!(name, "noop");
        // already detached
        assert!(manager.begin_run(0).is_none());

        manager.finish_run(0, system);
        assert!(manager.begin_run(0).is_some());
    }
}
