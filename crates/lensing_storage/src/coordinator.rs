//! The coordinator: single entry point over the entity, component and
//! system registries.
//!
//! Every structural change flows through here so the three registries stay
//! consistent. Attaching or detaching a component mutates its store, then
//! rewrites the entity's signature, then updates system membership for that
//! one entity.
//!
//! Registries report broken calling contracts as `Err`. The coordinator
//! treats them as programming errors and panics after logging them. Only
//! [`Coordinator::create_entity`] returns a `Result`, since running out of
//! entity capacity is an ordinary runtime condition.

use tracing::{debug, error, trace};

use lensing_foundation::{
    ComponentTypeId, DEFAULT_MAX_ENTITIES, Entity, Error, Result, Signature,
};

use crate::component::{Component, ComponentRegistry};
use crate::entity::EntityRegistry;
use crate::system::{EntitySet, System, SystemRegistry};

/// Construction parameters for a [`Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcsConfig {
    /// Maximum number of simultaneously live entities.
    pub max_entities: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

impl EcsConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the live entity limit.
    #[must_use]
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_entities` is zero or exceeds the
    /// handle range.
    pub fn validate(&self) -> Result<()> {
        if self.max_entities == 0 {
            return Err(Error::invalid_config("max_entities must be at least 1"));
        }
        if u32::try_from(self.max_entities).is_err() {
            return Err(Error::invalid_config(format!(
                "max_entities {} exceeds the entity handle range",
                self.max_entities
            )));
        }
        Ok(())
    }
}

/// Escalates a contract violation reported by a registry into a panic.
#[track_caller]
fn contract<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, context = ?err.context, "ECS contract violation");
            panic!("ECS contract violation: {err}");
        }
    }
}

/// Facade owning all ECS state.
#[derive(Debug, Default)]
pub struct Coordinator {
    entities: EntityRegistry,
    components: ComponentRegistry,
    systems: SystemRegistry,
}

impl Coordinator {
    /// Creates a coordinator with the default entity limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a coordinator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: EcsConfig) -> Result<Self> {
        config.validate()?;
        debug!(max_entities = config.max_entities, "coordinator created");
        Ok(Self {
            entities: EntityRegistry::new(config.max_entities),
            components: ComponentRegistry::new(),
            systems: SystemRegistry::new(),
        })
    }

    // --- Entities ---

    /// Creates an entity with no components.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the live entity limit has been reached.
    pub fn create_entity(&mut self) -> Result<Entity> {
        let entity = self.entities.create()?;
        self.systems.entity_signature_changed(entity, Signature::EMPTY);
        debug!(%entity, live = self.entities.len(), "entity created");
        Ok(entity)
    }

    /// Destroys an entity, dropping all its components and memberships.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    #[track_caller]
    pub fn destroy_entity(&mut self, entity: Entity) {
        contract(self.entities.validate(entity));

        let dropped = self.components.entity_destroyed(entity);
        self.systems.entity_destroyed(entity);
        contract(self.entities.destroy(entity));

        debug!(%entity, dropped, live = self.entities.len(), "entity destroyed");
    }

    /// Returns true if the entity is live.
    #[must_use]
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.exists(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the live entity limit.
    #[must_use]
    pub fn max_entities(&self) -> usize {
        self.entities.capacity()
    }

    /// Returns the component signature of a live entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    #[must_use]
    #[track_caller]
    pub fn signature(&self, entity: Entity) -> Signature {
        contract(self.entities.signature(entity))
    }

    /// Iterates over live entities.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().map(|(entity, _)| entity)
    }

    // --- Components ---

    /// Registers a component kind.
    ///
    /// # Panics
    ///
    /// Panics if the kind is already registered or the kind limit is reached.
    #[track_caller]
    pub fn register_component<T: Component>(&mut self) -> ComponentTypeId {
        let id = contract(self.components.register::<T>());
        debug!(component = T::NAME, id = id.index(), "component registered");
        id
    }

    /// Returns the id of a registered component kind.
    ///
    /// # Panics
    ///
    /// Panics if the kind is not registered.
    #[must_use]
    #[track_caller]
    pub fn component_type<T: Component>(&self) -> ComponentTypeId {
        contract(self.components.component_type::<T>())
    }

    /// Attaches a component to an entity and updates system membership.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live, the kind is unregistered, or the
    /// entity already has a component of this kind.
    #[track_caller]
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        contract(self.entities.validate(entity));
        contract(self.components.add(entity, component));

        let id = contract(self.components.component_type::<T>());
        let signature = contract(self.entities.signature(entity)).with(id);
        contract(self.entities.set_signature(entity, signature));
        self.systems.entity_signature_changed(entity, signature);

        trace!(%entity, component = T::NAME, "component added");
    }

    /// Detaches a component from an entity, returning it, and updates system
    /// membership.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live, the kind is unregistered, or the
    /// entity has no component of this kind.
    #[track_caller]
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> T {
        contract(self.entities.validate(entity));
        let component = contract(self.components.remove::<T>(entity));

        let id = contract(self.components.component_type::<T>());
        let signature = contract(self.entities.signature(entity)).without(id);
        contract(self.entities.set_signature(entity, signature));
        self.systems.entity_signature_changed(entity, signature);

        trace!(%entity, component = T::NAME, "component removed");
        component
    }

    /// Returns an entity's component.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered or the entity has none.
    #[must_use]
    #[track_caller]
    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        contract(self.components.get(entity))
    }

    /// Returns an entity's component, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered or the entity has none.
    #[track_caller]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        contract(self.components.get_mut(entity))
    }

    /// Returns an entity's component if it has one.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered.
    #[must_use]
    #[track_caller]
    pub fn try_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        contract(self.components.store::<T>()).get(entity).ok()
    }

    /// Returns true if the entity has a component of this kind.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered.
    #[must_use]
    #[track_caller]
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        contract(self.components.store::<T>()).contains(entity)
    }

    /// Returns the component registry for read-only inspection.
    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    // --- Systems ---

    /// Registers a default-constructed system and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is already registered.
    #[track_caller]
    pub fn register_system<S: System + Default>(&mut self) -> &mut S {
        self.register_system_with(S::default())
    }

    /// Registers a pre-built system instance and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is already registered.
    #[track_caller]
    pub fn register_system_with<S: System>(&mut self, system: S) -> &mut S {
        let system = contract(self.systems.register(system));
        debug!(system = S::NAME, "system registered");
        system
    }

    /// Sets the components a system requires and recomputes its membership
    /// over every live entity.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[track_caller]
    pub fn set_system_signature<S: System>(&mut self, signature: Signature) {
        contract(self.systems.set_signature::<S>(signature, self.entities.iter()));
        debug!(
            system = S::NAME,
            ?signature,
            members = self.system_entities::<S>().len(),
            "system signature set"
        );
    }

    /// Returns the required signature of a system, or `None` while unset.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[must_use]
    #[track_caller]
    pub fn system_signature<S: System>(&self) -> Option<Signature> {
        contract(self.systems.signature::<S>())
    }

    /// Returns the entities currently matching a system.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[must_use]
    #[track_caller]
    pub fn system_entities<S: System>(&self) -> &EntitySet {
        contract(self.systems.entities::<S>())
    }

    /// Returns a registered system.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[must_use]
    #[track_caller]
    pub fn system<S: System>(&self) -> &S {
        contract(self.systems.system::<S>())
    }

    /// Returns a registered system, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[track_caller]
    pub fn system_mut<S: System>(&mut self) -> &mut S {
        contract(self.systems.system_mut::<S>())
    }

    /// Opens a view over a system's members with component access.
    ///
    /// The view borrows the coordinator mutably, so no entity can be created
    /// or destroyed and no component attached or detached while it lives.
    ///
    /// # Panics
    ///
    /// Panics if the system kind is not registered.
    #[track_caller]
    pub fn view<S: System>(&mut self) -> SystemView<'_> {
        let members = contract(self.systems.entities::<S>());
        SystemView {
            members,
            entities: &self.entities,
            components: &mut self.components,
        }
    }
}

/// Iteration handle over one system's members.
///
/// Grants read and write access to component values but no structural
/// mutation.
pub struct SystemView<'a> {
    members: &'a EntitySet,
    entities: &'a EntityRegistry,
    components: &'a mut ComponentRegistry,
}

impl<'a> SystemView<'a> {
    /// The system's members.
    ///
    /// The returned set outlives the borrow of the view, so it can be
    /// iterated while components are accessed through the view.
    #[must_use]
    pub fn members(&self) -> &'a EntitySet {
        self.members
    }

    /// Returns the signature of a member.
    ///
    /// # Panics
    ///
    /// Panics if the entity is not live.
    #[must_use]
    #[track_caller]
    pub fn signature(&self, entity: Entity) -> Signature {
        contract(self.entities.signature(entity))
    }

    /// Returns an entity's component.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered or the entity has none.
    #[must_use]
    #[track_caller]
    pub fn get<T: Component>(&self, entity: Entity) -> &T {
        contract(self.components.get(entity))
    }

    /// Returns an entity's component, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered or the entity has none.
    #[track_caller]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
        contract(self.components.get_mut(entity))
    }

    /// Returns an entity's component if it has one.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered.
    #[must_use]
    #[track_caller]
    pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
        contract(self.components.store::<T>()).get(entity).ok()
    }

    /// Returns true if the entity has a component of this kind.
    ///
    /// # Panics
    ///
    /// Panics if the kind is unregistered.
    #[must_use]
    #[track_caller]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        contract(self.components.store::<T>()).contains(entity)
    }
}
