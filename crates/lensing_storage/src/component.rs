//! Component kinds and the registry that owns their stores.
//!
//! Each component kind is registered once, receiving the next dense
//! [`ComponentTypeId`]. The kind is keyed by the tag it declares in
//! [`Component::NAME`], and its [`PackedStore`] is kept behind the
//! kind-erased [`ErasedStore`] interface.

use std::collections::HashMap;

use lensing_foundation::{ComponentTypeId, Entity, Error, MAX_COMPONENTS, Result};

use crate::packed::{ErasedStore, PackedStore};

/// A plain data value that can be attached to an entity.
///
/// `NAME` is the registration key for the kind. It must be unique among the
/// kinds registered with one registry.
pub trait Component: 'static {
    /// Registration tag for this component kind.
    const NAME: &'static str;
}

/// Owns one packed store per registered component kind.
#[derive(Default)]
pub struct ComponentRegistry {
    /// Tag -> assigned id.
    ids: HashMap<&'static str, ComponentTypeId>,
    /// Stores indexed by `ComponentTypeId::index`.
    stores: Vec<Box<dyn ErasedStore>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component kind and creates its store.
    ///
    /// # Errors
    ///
    /// Returns `ComponentAlreadyRegistered` if the tag is taken, or
    /// `ComponentLimitExceeded` if every signature bit is already assigned.
    pub fn register<T: Component>(&mut self) -> Result<ComponentTypeId> {
        if self.ids.contains_key(T::NAME) {
            return Err(Error::component_already_registered(T::NAME));
        }

        let id = ComponentTypeId::from_index(self.stores.len())
            .ok_or_else(|| Error::component_limit_exceeded(MAX_COMPONENTS))?;

        self.ids.insert(T::NAME, id);
        self.stores.push(Box::new(PackedStore::<T>::new()));
        Ok(id)
    }

    /// Returns the id assigned to a component kind.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` if the kind was never registered.
    pub fn component_type<T: Component>(&self) -> Result<ComponentTypeId> {
        self.ids
            .get(T::NAME)
            .copied()
            .ok_or_else(|| Error::component_not_registered(T::NAME))
    }

    /// Returns true if the kind has been registered.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.ids.contains_key(T::NAME)
    }

    /// Returns the typed store for a component kind.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotRegistered` for unknown kinds and
    /// `ComponentTypeMismatch` if the tag belongs to a different type.
    pub fn store<T: Component>(&self) -> Result<&PackedStore<T>> {
        let id = self.component_type::<T>()?;
        self.stores[id.index()]
            .as_any()
            .downcast_ref::<PackedStore<T>>()
            .ok_or_else(|| Error::component_type_mismatch(T::NAME))
    }

    /// Returns the typed store for a component kind, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`ComponentRegistry::store`].
    pub fn store_mut<T: Component>(&mut self) -> Result<&mut PackedStore<T>> {
        let id = self.component_type::<T>()?;
        self.stores[id.index()]
            .as_any_mut()
            .downcast_mut::<PackedStore<T>>()
            .ok_or_else(|| Error::component_type_mismatch(T::NAME))
    }

    /// Attaches a component value to an entity.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unregistered or the entity already has one.
    pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        self.store_mut::<T>()?.insert(entity, value)
    }

    /// Detaches a component from an entity and returns the value.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unregistered or the entity has none.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T> {
        self.store_mut::<T>()?.remove(entity)
    }

    /// Returns an entity's component value.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unregistered or the entity has none.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.store::<T>()?.get(entity)
    }

    /// Returns an entity's component value, mutably.
    ///
    /// # Errors
    ///
    /// Fails if the kind is unregistered or the entity has none.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.store_mut::<T>()?.get_mut(entity)
    }

    /// Removes the entity from every store. Returns how many values were dropped.
    pub fn entity_destroyed(&mut self, entity: Entity) -> usize {
        self.stores
            .iter_mut()
            .map(|store| store.entity_destroyed(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// Returns true if any store holds a value for the entity.
    #[must_use]
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.stores.iter().any(|store| store.contains(entity))
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if no kinds are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Iterates over registered kinds as `(id, name)` in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = (ComponentTypeId, &'static str)> + '_ {
        self.stores.iter().enumerate().filter_map(|(index, store)| {
            ComponentTypeId::from_index(index).map(|id| (id, store.component_name()))
        })
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.stores
                    .iter()
                    .map(|store| (store.component_name(), store.len())),
            )
            .finish()
    }
}
