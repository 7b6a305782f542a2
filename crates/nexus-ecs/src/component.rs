//! Component storage and registration
//!
//! Components live in densely packed per-type arrays so systems iterate
//! over contiguous memory. The registry maps each registered type to a
//! signature bit (assigned in registration order) and owns the type-erased
//! arrays behind a `TypeId` lookup.

use crate::entity::Entity;
use crate::error::{EcsError, EcsResult};
use crate::limits::MAX_COMPONENTS;
use crate::signature::Signature;
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// Marker trait for component types.
///
/// Blanket-implemented: any `Send + Sync + 'static` type is a component.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

/// Densely packed storage for a single component type.
///
/// Removal swaps the last element into the vacated slot, so occupied
/// indices are always exactly `0..len` and iteration touches no holes.
pub struct ComponentArray<T: Component> {
    /// Dense storage; position in the vector is the dense index
    dense: Vec<(Entity, T)>,
    /// Entity to dense-index lookup
    indices: FxHashMap<Entity, usize>,
}

impl<T: Component> Default for ComponentArray<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            indices: FxHashMap::default(),
        }
    }
}

impl<T: Component> ComponentArray<T> {
    /// Store a component for `entity`.
    pub fn insert(&mut self, entity: Entity, component: T) -> EcsResult<()> {
        if self.indices.contains_key(&entity) {
            return Err(EcsError::DuplicateComponent(
                entity,
                std::any::type_name::<T>(),
            ));
        }

        self.indices.insert(entity, self.dense.len());
        self.dense.push((entity, component));

        Ok(())
    }

    /// Remove and return `entity`'s component.
    pub fn remove(&mut self, entity: Entity) -> EcsResult<T> {
        let index = self
            .indices
            .remove(&entity)
            .ok_or_else(|| EcsError::MissingComponent(entity, std::any::type_name::<T>()))?;

        // swap the last element into the hole to stay dense
        let (_, component) = self.dense.swap_remove(index);
        if let Some((moved, _)) = self.dense.get(index) {
            self.indices.insert(*moved, index);
        }

        Ok(component)
    }

    /// Borrow `entity`'s component.
    pub fn get(&self, entity: Entity) -> EcsResult<&T> {
        self.indices
            .get(&entity)
            .map(|index| &self.dense[*index].1)
            .ok_or_else(|| EcsError::MissingComponent(entity, std::any::type_name::<T>()))
    }

    /// Mutably borrow `entity`'s component.
    pub fn get_mut(&mut self, entity: Entity) -> EcsResult<&mut T> {
        match self.indices.get(&entity) {
            Some(index) => Ok(&mut self.dense[*index].1),
            None => Err(EcsError::MissingComponent(
                entity,
                std::any::type_name::<T>(),
            )),
        }
    }

    /// Whether `entity` has a component here.
    pub fn contains(&self, entity: Entity) -> bool {
        self.indices.contains_key(&entity)
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Iterate `(entity, component)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.dense.iter().map(|(entity, c)| (*entity, c))
    }
}

/// Object-safe view of a [`ComponentArray`] for the registry.
trait AnyComponentArray: Send + Sync {
    /// Drop the entity's component if it has one.
    fn entity_destroyed(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponentArray for ComponentArray<T> {
    fn entity_destroyed(&mut self, entity: Entity) {
        // absence is fine here, despawn visits every array
        let _ = self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct RegistryEntry {
    bit: Signature,
    array: Box<dyn AnyComponentArray>,
}

/// Maps component types to signature bits and owns their storage.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: FxHashMap<TypeId, RegistryEntry>,
    next_bit: u32,
}

impl ComponentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type, assigning it the next signature bit.
    pub fn register<T: Component>(&mut self) -> EcsResult<Signature> {
        if self.entries.contains_key(&TypeId::of::<T>()) {
            return Err(EcsError::ComponentAlreadyRegistered(
                std::any::type_name::<T>(),
            ));
        }
        if self.next_bit >= MAX_COMPONENTS {
            return Err(EcsError::ComponentBitsExhausted);
        }

        let bit = Signature::from_bit(self.next_bit);
        self.next_bit += 1;
        self.entries.insert(
            TypeId::of::<T>(),
            RegistryEntry {
                bit,
                array: Box::new(ComponentArray::<T>::default()),
            },
        );

        Ok(bit)
    }

    /// The signature bit assigned to `T`.
    pub fn signature_bit<T: Component>(&self) -> EcsResult<Signature> {
        self.entry::<T>().map(|entry| entry.bit)
    }

    /// Borrow the storage for `T`.
    pub fn array<T: Component>(&self) -> EcsResult<&ComponentArray<T>> {
        self.entry::<T>().map(|entry| {
            entry
                .array
                .as_any()
                .downcast_ref::<ComponentArray<T>>()
                .unwrap_or_else(|| unreachable!("registry entry type mismatch"))
        })
    }

    /// Mutably borrow the storage for `T`.
    pub fn array_mut<T: Component>(&mut self) -> EcsResult<&mut ComponentArray<T>> {
        let name = std::any::type_name::<T>();
        let entry = self
            .entries
            .get_mut(&TypeId::of::<T>())
            .ok_or(EcsError::UnregisteredComponent(name))?;

        Ok(entry
            .array
            .as_any_mut()
            .downcast_mut::<ComponentArray<T>>()
            .unwrap_or_else(|| unreachable!("registry entry type mismatch")))
    }

    /// Drop every component the entity carries.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for entry in self.entries.values_mut() {
            entry.array.entity_destroyed(entity);
        }
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no component types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry<T: Component>(&self) -> EcsResult<&RegistryEntry> {
        self.entries
            .get(&TypeId::of::<T>())
            .ok_or(EcsError::UnregisteredComponent(std::any::type_name::<T>()))
    }
}

/// A tuple of component types resolvable to a combined [`Signature`].
///
/// Implemented for tuples of one through eight component types. Duplicate
/// members collapse into the same bit.
pub trait ComponentSet {
    /// Resolve the combined signature through the registry.
    fn signature(registry: &ComponentRegistry) -> EcsResult<Signature>;
}

macro_rules! impl_component_set {
    ($($comp:ident),+) => {
        impl<$($comp: Component),+> ComponentSet for ($($comp,)+) {
            fn signature(registry: &ComponentRegistry) -> EcsResult<Signature> {
                let mut signature = Signature::EMPTY;
                $(signature.insert(registry.signature_bit::<$comp>()?);)+
                Ok(signature)
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);

    #[derive(Debug, PartialEq)]
    struct Armor(i32);

    fn entity(id: u32) -> Entity {
        Entity::from_raw(id)
    }

    #[test]
    fn test_insert_get_remove() {
        let mut array = ComponentArray::<Health>::default();
        array.insert(entity(1), Health(10)).unwrap();
        array.insert(entity(2), Health(20)).unwrap();

        assert_eq!(array.get(entity(1)).unwrap(), &Health(10));
        array.get_mut(entity(2)).unwrap().0 = 25;
        assert_eq!(array.get(entity(2)).unwrap(), &Health(25));

        assert_eq!(array.remove(entity(1)).unwrap(), Health(10));
        assert!(!array.contains(entity(1)));
        assert_eq!(array.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut array = ComponentArray::<Health>::default();
        array.insert(entity(1), Health(10)).unwrap();

        assert!(matches!(
            array.insert(entity(1), Health(99)),
            Err(EcsError::DuplicateComponent(..))
        ));
        assert_eq!(array.get(entity(1)).unwrap(), &Health(10));
    }

    #[test]
    fn test_swap_remove_keeps_density() {
        let mut array = ComponentArray::<Health>::default();
        for id in 0..4 {
            array.insert(entity(id), Health(id as i32)).unwrap();
        }

        // removing from the middle moves the tail element into the hole
        array.remove(entity(1)).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(entity(3)).unwrap(), &Health(3));

        let mut seen: Vec<u32> = array.iter().map(|(e, _)| e.to_raw()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 2, 3]);

        // degenerate case: removing the tail itself
        array.remove(entity(3)).unwrap();
        assert_eq!(array.get(entity(0)).unwrap(), &Health(0));
        assert_eq!(array.get(entity(2)).unwrap(), &Health(2));
    }

    #[test]
    fn test_missing_component_errors() {
        let mut array = ComponentArray::<Health>::default();

        assert!(matches!(
            array.get(entity(7)),
            Err(EcsError::MissingComponent(..))
        ));
        assert!(matches!(
            array.remove(entity(7)),
            Err(EcsError::MissingComponent(..))
        ));
    }

    #[test]
    fn test_registry_bit_assignment() {
        let mut registry = ComponentRegistry::new();
        let health_bit = registry.register::<Health>().unwrap();
        let armor_bit = registry.register::<Armor>().unwrap();

        // bits follow registration order
        assert_eq!(health_bit, Signature::from_bit(0));
        assert_eq!(armor_bit, Signature::from_bit(1));
        assert_eq!(registry.signature_bit::<Health>().unwrap(), health_bit);
    }

    #[test]
    fn test_registry_rejects_double_registration() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Health>().unwrap();

        assert!(matches!(
            registry.register::<Health>(),
            Err(EcsError::ComponentAlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_registry_unregistered_lookup() {
        let registry = ComponentRegistry::new();

        assert!(matches!(
            registry.signature_bit::<Health>(),
            Err(EcsError::UnregisteredComponent(_))
        ));
        assert!(matches!(
            registry.array::<Health>(),
            Err(EcsError::UnregisteredComponent(_))
        ));
    }

    #[test]
    fn test_registry_entity_destroyed() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Health>().unwrap();
        registry.register::<Armor>().unwrap();

        registry
            .array_mut::<Health>()
            .unwrap()
            .insert(entity(1), Health(5))
            .unwrap();
        registry
            .array_mut::<Armor>()
            .unwrap()
            .insert(entity(1), Armor(2))
            .unwrap();

        registry.entity_destroyed(entity(1));
        assert!(registry.array::<Health>().unwrap().is_empty());
        assert!(registry.array::<Armor>().unwrap().is_empty());
    }

    #[test]
    fn test_component_set_signature() {
        let mut registry = ComponentRegistry::new();
        registry.register::<Health>().unwrap();
        registry.register::<Armor>().unwrap();

        let sig = <(Health, Armor)>::signature(&registry).unwrap();
        assert_eq!(sig, Signature::from_bits(0b11));

        // duplicates collapse
        let sig = <(Health, Health)>::signature(&registry).unwrap();
        assert_eq!(sig, Signature::from_bit(0));

        struct Unregistered;
        assert!(<(Health, Unregistered)>::signature(&registry).is_err());
    }
}
