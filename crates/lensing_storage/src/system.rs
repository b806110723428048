//! System registration and incremental membership tracking.
//!
//! Every registered system owns a required [`Signature`] and an
//! [`EntitySet`] holding exactly the live entities whose signature is a
//! superset of it. Membership is updated one entity at a time as component
//! ownership changes, so systems never scan the whole population.

use std::any::Any;
use std::collections::HashMap;

use lensing_foundation::{Entity, Error, Result, Signature};

/// A unit of per-tick logic that iterates over a filtered entity set.
///
/// `NAME` is the registration key for the system kind.
pub trait System: 'static {
    /// Registration tag for this system kind.
    const NAME: &'static str;
}

/// Unordered set of entities with O(1) insert, erase and lookup.
///
/// Members are kept densely packed; erasing moves the last member into the
/// vacated position, so iteration order changes across removals.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    dense: Vec<Entity>,
    sparse: Vec<Option<usize>>,
}

impl EntitySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity. Returns false if it was already a member.
    pub fn insert(&mut self, entity: Entity) -> bool {
        let slot = entity.slot();
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        } else if self.sparse[slot].is_some() {
            return false;
        }

        self.sparse[slot] = Some(self.dense.len());
        self.dense.push(entity);
        true
    }

    /// Removes an entity. Returns false if it was not a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(position) = self.sparse.get_mut(entity.slot()).and_then(Option::take) else {
            return false;
        };

        self.dense.swap_remove(position);
        if let Some(moved) = self.dense.get(position) {
            self.sparse[moved.slot()] = Some(position);
        }
        true
    }

    /// Returns true if the entity is a member.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        matches!(self.sparse.get(entity.slot()), Some(Some(_)))
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Removes every member, keeping allocations.
    pub fn clear(&mut self) {
        for entity in self.dense.drain(..) {
            self.sparse[entity.slot()] = None;
        }
    }

    /// Iterates over members.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.dense.iter().copied()
    }

    /// Members as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.dense
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = Entity;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dense.iter().copied()
    }
}

/// Registration record for one system.
struct SystemRecord {
    name: &'static str,
    /// `None` until a signature is set; matches nothing while unset.
    required: Option<Signature>,
    members: EntitySet,
    instance: Box<dyn Any>,
}

impl SystemRecord {
    fn matches(&self, signature: Signature) -> bool {
        self.required
            .is_some_and(|required| signature.contains_all(required))
    }

    fn update(&mut self, entity: Entity, signature: Signature) {
        if self.matches(signature) {
            self.members.insert(entity);
        } else {
            self.members.remove(entity);
        }
    }
}

/// Owns every registered system and its membership set.
#[derive(Default)]
pub struct SystemRegistry {
    ids: HashMap<&'static str, usize>,
    records: Vec<SystemRecord>,
}

impl SystemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a system instance and returns a handle to it.
    ///
    /// The required signature starts unset, so the system has no members
    /// until [`SystemRegistry::set_signature`] is called.
    ///
    /// # Errors
    ///
    /// Returns `SystemAlreadyRegistered` if the kind is already registered.
    pub fn register<S: System>(&mut self, system: S) -> Result<&mut S> {
        if self.ids.contains_key(S::NAME) {
            return Err(Error::system_already_registered(S::NAME));
        }

        self.ids.insert(S::NAME, self.records.len());
        self.records.push(SystemRecord {
            name: S::NAME,
            required: None,
            members: EntitySet::new(),
            instance: Box::new(system),
        });

        self.system_mut::<S>()
    }

    /// Sets a system's required signature and rebuilds its membership from
    /// the given live population.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if the kind is unknown.
    pub fn set_signature<S: System>(
        &mut self,
        signature: Signature,
        live: impl IntoIterator<Item = (Entity, Signature)>,
    ) -> Result<()> {
        let record = self.record_mut::<S>()?;
        record.required = Some(signature);
        record.members.clear();
        for (entity, entity_signature) in live {
            if entity_signature.contains_all(signature) {
                record.members.insert(entity);
            }
        }
        Ok(())
    }

    /// Returns a system's required signature, or `None` if still unset.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if the kind is unknown.
    pub fn signature<S: System>(&self) -> Result<Option<Signature>> {
        Ok(self.record::<S>()?.required)
    }

    /// Updates every system's membership for one entity after its signature changed.
    pub fn entity_signature_changed(&mut self, entity: Entity, signature: Signature) {
        for record in &mut self.records {
            record.update(entity, signature);
        }
    }

    /// Removes a destroyed entity from every membership set.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for record in &mut self.records {
            record.members.remove(entity);
        }
    }

    /// Returns the current members of a system.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if the kind is unknown.
    pub fn entities<S: System>(&self) -> Result<&EntitySet> {
        Ok(&self.record::<S>()?.members)
    }

    /// Returns a registered system instance.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if the kind is unknown, or
    /// `SystemTypeMismatch` if the tag belongs to a different type.
    pub fn system<S: System>(&self) -> Result<&S> {
        self.record::<S>()?
            .instance
            .downcast_ref::<S>()
            .ok_or_else(|| Error::system_type_mismatch(S::NAME))
    }

    /// Returns a registered system instance, mutably.
    ///
    /// # Errors
    ///
    /// Returns `SystemNotRegistered` if the kind is unknown, or
    /// `SystemTypeMismatch` if the tag belongs to a different type.
    pub fn system_mut<S: System>(&mut self) -> Result<&mut S> {
        self.record_mut::<S>()?
            .instance
            .downcast_mut::<S>()
            .ok_or_else(|| Error::system_type_mismatch(S::NAME))
    }

    /// Returns true if the system kind is registered.
    #[must_use]
    pub fn is_registered<S: System>(&self) -> bool {
        self.ids.contains_key(S::NAME)
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over `(name, member count)` in registration order.
    pub fn summary(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.records
            .iter()
            .map(|record| (record.name, record.members.len()))
    }

    fn record<S: System>(&self) -> Result<&SystemRecord> {
        self.ids
            .get(S::NAME)
            .map(|&index| &self.records[index])
            .ok_or_else(|| Error::system_not_registered(S::NAME))
    }

    fn record_mut<S: System>(&mut self) -> Result<&mut SystemRecord> {
        match self.ids.get(S::NAME) {
            Some(&index) => Ok(&mut self.records[index]),
            None => Err(Error::system_not_registered(S::NAME)),
        }
    }
}

impl std::fmt::Debug for SystemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.summary()).finish()
    }
}
