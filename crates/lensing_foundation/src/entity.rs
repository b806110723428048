//! Entity handles.

use std::fmt;

/// Default upper bound on the number of simultaneously live entities.
pub const DEFAULT_MAX_ENTITIES: usize = 5000;

/// Opaque entity handle.
///
/// An entity carries no data of its own; it is only a key into the component
/// stores. Handles of destroyed entities are recycled, so a handle value is only
/// meaningful while the entity it was issued for is alive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Creates a handle from its raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize`, for addressing sparse arrays.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for Entity {
    fn from(index: u32) -> Self {
        Self(index)
    }
}
