//! Entity ids and allocation

use crate::error::{EcsError, EcsResult};
use crate::limits::Limits;
use crate::signature::Signature;
use std::collections::VecDeque;
use std::fmt;

/// Unique identifier for an entity.
///
/// Ids are dense (below the world's entity ceiling) and recycled after
/// despawn, so an `Entity` held across a despawn may alias a newer entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Build an entity id from its raw value.
    ///
    /// Intended for tests and tooling; live ids come from the allocator.
    #[inline]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out entity ids and tracks per-entity signatures.
///
/// Ids are recycled FIFO: a despawned id goes to the back of the free
/// queue and is only reused after every other available id.
pub struct EntityAllocator {
    /// Free ids, front is the next to hand out
    available: VecDeque<u32>,
    /// Per-id component signature, indexed by raw id
    signatures: Vec<Signature>,
    /// Per-id liveness, indexed by raw id
    alive: Vec<bool>,
    limits: Limits,
    live_count: u32,
}

impl EntityAllocator {
    /// Allocator with capacity for `limits.max_entities` live entities.
    pub fn new(limits: Limits) -> Self {
        let max = limits.max_entities as usize;
        Self {
            available: (0..limits.max_entities).collect(),
            signatures: vec![Signature::EMPTY; max],
            alive: vec![false; max],
            limits,
            live_count: 0,
        }
    }

    /// Hand out the next free id.
    pub fn allocate(&mut self) -> EcsResult<Entity> {
        let id = self
            .available
            .pop_front()
            .ok_or(EcsError::EntityLimit(self.live_count))?;

        self.alive[id as usize] = true;
        self.live_count += 1;

        Ok(Entity(id))
    }

    /// Return an id to the pool and clear its signature.
    pub fn deallocate(&mut self, entity: Entity) -> EcsResult<()> {
        self.check_alive(entity)?;

        let index = entity.0 as usize;
        self.signatures[index] = Signature::EMPTY;
        self.alive[index] = false;
        self.available.push_back(entity.0);
        self.live_count -= 1;

        Ok(())
    }

    /// Whether the entity is currently live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.0 as usize).copied().unwrap_or(false)
    }

    /// The entity's component signature.
    pub fn signature(&self, entity: Entity) -> EcsResult<Signature> {
        self.check_alive(entity)?;
        Ok(self.signatures[entity.0 as usize])
    }

    /// Overwrite the entity's component signature.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> EcsResult<()> {
        self.check_alive(entity)?;
        self.signatures[entity.0 as usize] = signature;
        Ok(())
    }

    /// Number of currently live entities.
    pub fn live_count(&self) -> u32 {
        self.live_count
    }

    /// The limits this allocator was built with.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Iterate over all live entities, ascending id order.
    pub fn live_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(id, _)| Entity(id as u32))
    }

    fn check_alive(&self, entity: Entity) -> EcsResult<()> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::DeadEntity(entity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_allocator() -> EntityAllocator {
        EntityAllocator::new(Limits::with_max_entities(4))
    }

    #[test]
    fn test_allocate_sequential() {
        let mut alloc = small_allocator();

        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        assert_eq!(a.to_raw(), 0);
        assert_eq!(b.to_raw(), 1);
        assert_eq!(alloc.live_count(), 2);
        assert!(alloc.is_alive(a));
    }

    #[test]
    fn test_limit_enforced() {
        let mut alloc = small_allocator();
        for _ in 0..4 {
            alloc.allocate().unwrap();
        }

        assert!(matches!(alloc.allocate(), Err(EcsError::EntityLimit(4))));
        assert_eq!(alloc.live_count(), 4);
    }

    #[test]
    fn test_fifo_recycling() {
        let mut alloc = small_allocator();
        let a = alloc.allocate().unwrap();
        alloc.deallocate(a).unwrap();

        // the recycled id comes back only after the never-used ids
        let ids: Vec<u32> = (0..4).map(|_| alloc.allocate().unwrap().to_raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_deallocate_clears_signature() {
        let mut alloc = small_allocator();
        let a = alloc.allocate().unwrap();
        alloc.set_signature(a, Signature::from_bits(0b101)).unwrap();
        alloc.deallocate(a).unwrap();

        // drain the queue until `a` comes back around
        for _ in 0..3 {
            alloc.allocate().unwrap();
        }
        let reborn = alloc.allocate().unwrap();
        assert_eq!(reborn, a);
        assert_eq!(alloc.signature(reborn).unwrap(), Signature::EMPTY);
    }

    #[test]
    fn test_dead_entity_errors() {
        let mut alloc = small_allocator();
        let ghost = Entity::from_raw(2);

        assert!(matches!(
            alloc.signature(ghost),
            Err(EcsError::DeadEntity(_))
        ));
        assert!(matches!(
            alloc.deallocate(ghost),
            Err(EcsError::DeadEntity(_))
        ));

        let out_of_range = Entity::from_raw(1000);
        assert!(!alloc.is_alive(out_of_range));
        assert!(matches!(
            alloc.set_signature(out_of_range, Signature::EMPTY),
            Err(EcsError::DeadEntity(_))
        ));
    }

    #[test]
    fn test_live_entities_iteration() {
        let mut alloc = small_allocator();
        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        let c = alloc.allocate().unwrap();
        alloc.deallocate(b).unwrap();

        let live: Vec<Entity> = alloc.live_entities().collect();
        assert_eq!(live, vec![a, c]);
    }
}
