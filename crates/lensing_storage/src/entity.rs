//! Entity lifecycle management and per-entity signatures.
//!
//! The `EntityRegistry` issues entity handles, recycles the handles of
//! destroyed entities, and stores the component signature of every live
//! entity.

use std::collections::VecDeque;

use lensing_foundation::{DEFAULT_MAX_ENTITIES, Entity, Error, Result, Signature};

/// Issues and recycles entity handles.
///
/// Fresh handles are taken from the recycle queue first (oldest destroyed
/// handle first), otherwise the next never-used index is issued. The number
/// of live entities never exceeds the configured capacity.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Signature per entity index. `None` marks a free index.
    signatures: Vec<Option<Signature>>,
    /// Destroyed handles waiting for reuse.
    recycled: VecDeque<Entity>,
    /// Count of live entities.
    live_count: usize,
    /// Maximum number of live entities.
    capacity: usize,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTITIES)
    }
}

impl EntityRegistry {
    /// Creates an empty registry that holds at most `capacity` live entities.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            signatures: Vec::new(),
            recycled: VecDeque::new(),
            live_count: 0,
            capacity,
        }
    }

    /// Creates a new entity with an empty signature.
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the registry already holds `capacity`
    /// live entities.
    pub fn create(&mut self) -> Result<Entity> {
        if self.live_count >= self.capacity {
            return Err(Error::capacity_exceeded(self.capacity));
        }

        let entity = if let Some(entity) = self.recycled.pop_front() {
            self.signatures[entity.slot()] = Some(Signature::EMPTY);
            entity
        } else {
            // Every index below len() is live here, so len() < capacity.
            let index = u32::try_from(self.signatures.len())
                .map_err(|_| Error::capacity_exceeded(self.capacity))?;
            self.signatures.push(Some(Signature::EMPTY));
            Entity::new(index)
        };

        self.live_count += 1;
        Ok(entity)
    }

    /// Destroys an entity and queues its handle for reuse.
    ///
    /// Only the signature is reset. Removing the entity from component stores
    /// and system membership is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is not live.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        self.validate(entity)?;

        self.signatures[entity.slot()] = None;
        self.recycled.push_back(entity);
        self.live_count -= 1;

        Ok(())
    }

    /// Checks if an entity is live.
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        matches!(self.signatures.get(entity.slot()), Some(Some(_)))
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity was never issued or has been
    /// destroyed.
    pub fn validate(&self, entity: Entity) -> Result<()> {
        if self.exists(entity) {
            Ok(())
        } else {
            Err(Error::entity_not_found(entity))
        }
    }

    /// Returns the signature of a live entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is not live.
    pub fn signature(&self, entity: Entity) -> Result<Signature> {
        self.signatures
            .get(entity.slot())
            .copied()
            .flatten()
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    /// Replaces the signature of a live entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is not live.
    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<()> {
        match self.signatures.get_mut(entity.slot()) {
            Some(Some(slot)) => {
                *slot = signature;
                Ok(())
            }
            _ => Err(Error::entity_not_found(entity)),
        }
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the maximum number of live entities.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over all live entities with their signatures, by index.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, Signature)> + '_ {
        self.signatures
            .iter()
            .zip(0u32..)
            .filter_map(|(signature, index)| signature.as_ref().map(|sig| (Entity::new(index), *sig)))
    }
}
