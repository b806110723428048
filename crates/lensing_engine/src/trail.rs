//! Position history recording.

use tracing::trace;

use lensing_storage::{Coordinator, System};

use crate::components::{Trail, Transform2D};

/// Default number of points kept per trail.
pub const DEFAULT_TRAIL_LENGTH: usize = 100;

/// Appends each member's position to its `Trail` once per tick.
///
/// Members are entities with `Transform2D` and `Trail`.
#[derive(Debug)]
pub struct TrailSystem {
    trail_length: usize,
}

impl Default for TrailSystem {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_LENGTH)
    }
}

impl System for TrailSystem {
    const NAME: &'static str = "TrailSystem";
}

impl TrailSystem {
    /// Creates a recorder keeping at most `trail_length` points per trail.
    #[must_use]
    pub fn new(trail_length: usize) -> Self {
        Self { trail_length }
    }

    /// Maximum points per trail.
    #[must_use]
    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    /// Records the current position of every member.
    ///
    /// # Panics
    ///
    /// Panics if the system or its components are not registered.
    pub fn update(coordinator: &mut Coordinator) {
        let limit = coordinator.system::<Self>().trail_length;
        let mut view = coordinator.view::<Self>();

        for entity in view.members() {
            let position = view.get::<Transform2D>(entity).position;
            view.get_mut::<Trail>(entity).record(position, limit);
        }
        trace!(trails = view.members().len(), "trails recorded");
    }
}
