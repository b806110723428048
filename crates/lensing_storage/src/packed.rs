//! Dense, hole-free storage for one component kind.
//!
//! Values live in a contiguous `Vec`, one slot per owning entity. Two indices
//! map between entities and slots:
//! - `owners[slot]` is the entity owning that slot
//! - `slots[entity]` is the slot of that entity, if it has one
//!
//! Removal moves the last value into the vacated slot, so slot order is not
//! stable across removals.

use std::any::Any;

use lensing_foundation::{Entity, Error, Result};

use crate::component::Component;

/// Packed storage for all live values of one component kind.
#[derive(Debug, Clone)]
pub struct PackedStore<T> {
    /// Component values; slots `[0, len)` are all live.
    values: Vec<T>,
    /// Slot -> owning entity.
    owners: Vec<Entity>,
    /// Entity index -> slot.
    slots: Vec<Option<usize>>,
}

impl<T> Default for PackedStore<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            owners: Vec::new(),
            slots: Vec::new(),
        }
    }
}

impl<T: Component> PackedStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Appends a value for an entity.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateComponent` if the entity already has a value here.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<()> {
        if self.contains(entity) {
            return Err(Error::duplicate_component(entity, T::NAME));
        }

        let index = entity.slot();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }

        self.slots[index] = Some(self.values.len());
        self.owners.push(entity);
        self.values.push(value);
        Ok(())
    }

    /// Removes an entity's value and returns it.
    ///
    /// The last value is moved into the vacated slot and the moved entity's
    /// mapping is rewritten before the store shrinks.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity has no value here.
    pub fn remove(&mut self, entity: Entity) -> Result<T> {
        let slot = self
            .slots
            .get_mut(entity.slot())
            .and_then(Option::take)
            .ok_or_else(|| Error::component_not_found(entity, T::NAME))?;

        let value = self.values.swap_remove(slot);
        self.owners.swap_remove(slot);

        if let Some(&moved) = self.owners.get(slot) {
            self.slots[moved.slot()] = Some(slot);
        }

        Ok(value)
    }

    /// Returns a reference to an entity's value.
    ///
    /// The reference is valid until the next insert or remove on this store.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity has no value here.
    pub fn get(&self, entity: Entity) -> Result<&T> {
        self.slot_of(entity)
            .map(|slot| &self.values[slot])
            .ok_or_else(|| Error::component_not_found(entity, T::NAME))
    }

    /// Returns a mutable reference to an entity's value.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` if the entity has no value here.
    pub fn get_mut(&mut self, entity: Entity) -> Result<&mut T> {
        match self.slot_of(entity) {
            Some(slot) => Ok(&mut self.values[slot]),
            None => Err(Error::component_not_found(entity, T::NAME)),
        }
    }

    /// Removes the entity's value if it has one.
    pub fn entity_destroyed(&mut self, entity: Entity) -> Option<T> {
        self.remove(entity).ok()
    }
}

impl<T> PackedStore<T> {
    /// Returns true if the entity has a value here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot_of(entity).is_some()
    }

    /// Returns the slot currently holding the entity's value.
    ///
    /// Slots change on removal; do not hold on to one across a remove.
    #[must_use]
    pub fn slot_of(&self, entity: Entity) -> Option<usize> {
        self.slots.get(entity.slot()).copied().flatten()
    }

    /// Returns the entity owning a slot.
    #[must_use]
    pub fn entity_at(&self, slot: usize) -> Option<Entity> {
        self.owners.get(slot).copied()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Owning entities in slot order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.owners
    }

    /// Values in slot order.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable values in slot order.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterates over `(entity, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.owners.iter().copied().zip(self.values.iter())
    }

    /// Iterates mutably over `(entity, value)` pairs in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.owners.iter().copied().zip(self.values.iter_mut())
    }
}

/// Kind-erased view of a [`PackedStore`].
///
/// The component registry keeps every store behind this trait. Only the
/// operations that do not need the concrete type live here; typed access
/// goes through [`ErasedStore::as_any`] and a checked downcast.
pub trait ErasedStore {
    /// Name of the stored component kind.
    fn component_name(&self) -> &'static str;

    /// Number of stored values.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the entity has a value here.
    fn contains(&self, entity: Entity) -> bool;

    /// Drops the entity's value if present. Returns true if one was removed.
    fn entity_destroyed(&mut self, entity: Entity) -> bool;

    /// Upcast for typed downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStore for PackedStore<T> {
    fn component_name(&self) -> &'static str {
        T::NAME
    }

    fn len(&self) -> usize {
        PackedStore::len(self)
    }

    fn contains(&self, entity: Entity) -> bool {
        PackedStore::contains(self, entity)
    }

    fn entity_destroyed(&mut self, entity: Entity) -> bool {
        PackedStore::entity_destroyed(self, entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
