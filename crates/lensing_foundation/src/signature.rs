//! Component type ids and per-entity component signatures.
//!
//! A [`Signature`] is a fixed-width bitset with one bit per registered
//! component kind. Entities carry one to record what they own; systems carry
//! one to describe what they require.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Maximum number of distinct component kinds (the signature width).
pub const MAX_COMPONENTS: usize = 32;

/// Dense id of a registered component kind, in `[0, MAX_COMPONENTS)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(u8);

impl ComponentTypeId {
    /// Creates an id from its index, or `None` if the index does not fit in a
    /// signature.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < MAX_COMPONENTS {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the index of this id.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    const fn mask(self) -> u32 {
        1 << self.0
    }
}

impl fmt::Debug for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentTypeId({})", self.0)
    }
}

/// Fixed-width set of component type ids.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Signature(u32);

impl Signature {
    /// The empty signature.
    pub const EMPTY: Self = Self(0);

    /// Creates an empty signature.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a signature from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns a copy with the given component bit set.
    #[must_use]
    pub const fn with(self, id: ComponentTypeId) -> Self {
        Self(self.0 | id.mask())
    }

    /// Returns a copy with the given component bit cleared.
    #[must_use]
    pub const fn without(self, id: ComponentTypeId) -> Self {
        Self(self.0 & !id.mask())
    }

    /// Sets or clears the bit for a component.
    pub fn set(&mut self, id: ComponentTypeId, present: bool) {
        if present {
            self.0 |= id.mask();
        } else {
            self.0 &= !id.mask();
        }
    }

    /// Returns true if the bit for `id` is set.
    #[must_use]
    pub const fn contains(self, id: ComponentTypeId) -> bool {
        self.0 & id.mask() != 0
    }

    /// Returns true if every bit set in `required` is also set here.
    ///
    /// This is the system membership test: `self & required == required`.
    #[must_use]
    pub const fn contains_all(self, required: Signature) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns true if no bits are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of bits set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Clears every bit.
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Iterates over the ids whose bits are set, in ascending order.
    pub fn iter(self) -> impl Iterator<Item = ComponentTypeId> {
        (0..MAX_COMPONENTS)
            .filter_map(ComponentTypeId::from_index)
            .filter(move |id| self.contains(*id))
    }
}

impl BitAnd for Signature {
    type Output = Signature;

    fn bitand(self, rhs: Self) -> Self::Output {
        Signature(self.0 & rhs.0)
    }
}

impl BitOr for Signature {
    type Output = Signature;

    fn bitor(self, rhs: Self) -> Self::Output {
        Signature(self.0 | rhs.0)
    }
}

impl FromIterator<ComponentTypeId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentTypeId>>(iter: I) -> Self {
        iter.into_iter().fold(Signature::EMPTY, Signature::with)
    }
}

impl From<ComponentTypeId> for Signature {
    fn from(id: ComponentTypeId) -> Self {
        Signature::EMPTY.with(id)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#034b})", self.0)
    }
}
