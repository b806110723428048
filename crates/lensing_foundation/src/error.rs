//! Error types for ECS operations.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Two families of failure exist. Capacity exhaustion is an ordinary runtime
//! condition a caller may recover from. Everything else is a broken calling
//! contract (an unregistered kind, a double insert, a dead entity) that the
//! coordinator turns into a panic.

use thiserror::Error;

use crate::entity::Entity;

/// The main error type for ECS operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional description of the operation that failed.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns true if a caller can reasonably recover from this error.
    ///
    /// Only capacity exhaustion qualifies.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind, ErrorKind::CapacityExceeded { .. })
    }

    /// Creates a capacity exceeded error.
    #[must_use]
    pub fn capacity_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::CapacityExceeded { limit })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(entity: Entity) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity))
    }

    /// Creates an unregistered component error.
    #[must_use]
    pub fn component_not_registered(component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotRegistered(component))
    }

    /// Creates a duplicate component registration error.
    #[must_use]
    pub fn component_already_registered(component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentAlreadyRegistered(component))
    }

    /// Creates a component limit exceeded error.
    #[must_use]
    pub fn component_limit_exceeded(limit: usize) -> Self {
        Self::new(ErrorKind::ComponentLimitExceeded { limit })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateComponent { entity, component })
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates a component type mismatch error.
    #[must_use]
    pub fn component_type_mismatch(component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentTypeMismatch(component))
    }

    /// Creates an unregistered system error.
    #[must_use]
    pub fn system_not_registered(system: &'static str) -> Self {
        Self::new(ErrorKind::SystemNotRegistered(system))
    }

    /// Creates a system type mismatch error.
    #[must_use]
    pub fn system_type_mismatch(system: &'static str) -> Self {
        Self::new(ErrorKind::SystemTypeMismatch(system))
    }

    /// Creates a duplicate system registration error.
    #[must_use]
    pub fn system_already_registered(system: &'static str) -> Self {
        Self::new(ErrorKind::SystemAlreadyRegistered(system))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The live entity count is already at its maximum.
    #[error("entity capacity exceeded (limit {limit})")]
    CapacityExceeded {
        /// The configured maximum number of live entities.
        limit: usize,
    },

    /// Entity is not live.
    #[error("entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// Component kind was used before registration.
    #[error("component not registered: {0}")]
    ComponentNotRegistered(&'static str),

    /// Component kind was registered twice.
    #[error("component already registered: {0}")]
    ComponentAlreadyRegistered(&'static str),

    /// More component kinds than a signature can hold.
    #[error("component limit exceeded (limit {limit})")]
    ComponentLimitExceeded {
        /// The signature width.
        limit: usize,
    },

    /// Entity already owns a component of this kind.
    #[error("component {component} already attached to entity {entity:?}")]
    DuplicateComponent {
        /// The entity that already owns the component.
        entity: Entity,
        /// The component name.
        component: &'static str,
    },

    /// Entity does not own a component of this kind.
    #[error("component not found: {component} on entity {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: Entity,
        /// The component name that was not found.
        component: &'static str,
    },

    /// The store registered under this name holds a different concrete type.
    #[error("component type mismatch: store for {0} holds a different type")]
    ComponentTypeMismatch(&'static str),

    /// System kind was used before registration.
    #[error("system not registered: {0}")]
    SystemNotRegistered(&'static str),

    /// The instance registered under this name is a different concrete type.
    #[error("system type mismatch: instance for {0} is a different type")]
    SystemTypeMismatch(&'static str),

    /// System kind was registered twice.
    #[error("system already registered: {0}")]
    SystemAlreadyRegistered(&'static str),

    /// Configuration value is out of range or unparsable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias using the ECS error.
pub type Result<T> = std::result::Result<T, Error>;
