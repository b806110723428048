//! Component kinds used by the lensing simulation.

use std::collections::VecDeque;

use glam::{Vec2, Vec4};

use lensing_storage::Component;

/// Position in the simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform2D {
    /// World position.
    pub position: Vec2,
}

impl Component for Transform2D {
    const NAME: &'static str = "Transform2D";
}

impl Transform2D {
    /// Creates a transform at `position`.
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }
}

/// Cartesian velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity2D {
    /// Velocity in world units per time unit.
    pub velocity: Vec2,
}

impl Component for Velocity2D {
    const NAME: &'static str = "Velocity2D";
}

impl Velocity2D {
    /// Creates a velocity.
    #[must_use]
    pub fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// Marks a light ray and records its launch offset from the well.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projectile {
    /// Signed perpendicular distance between the launch line and the well.
    pub impact_parameter: f32,
}

impl Component for Projectile {
    const NAME: &'static str = "Projectile";
}

/// A massive body that bends light.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GravityWell {
    /// Mass of the body.
    pub mass: f32,
    /// Event horizon radius `r_s`.
    pub schwarzschild_radius: f32,
}

impl Component for GravityWell {
    const NAME: &'static str = "GravityWell";
}

/// Bounded history of past positions, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trail {
    /// Recorded positions, oldest at the front.
    pub positions: VecDeque<Vec2>,
}

impl Component for Trail {
    const NAME: &'static str = "Trail";
}

impl Trail {
    /// Creates an empty trail with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a position, dropping the oldest ones beyond `limit`.
    pub fn record(&mut self, position: Vec2, limit: usize) {
        self.positions.push_back(position);
        while self.positions.len() > limit {
            self.positions.pop_front();
        }
    }

    /// Number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The most recently recorded position.
    #[must_use]
    pub fn head(&self) -> Option<Vec2> {
        self.positions.back().copied()
    }
}

/// Drawn as a filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    /// Circle radius in world units.
    pub radius: f32,
}

impl Component for Spherical {
    const NAME: &'static str = "Spherical";
}

/// RGBA draw color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red, green, blue, alpha in `[0, 1]`.
    pub rgba: Vec4,
}

impl Component for Color {
    const NAME: &'static str = "Color";
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self { rgba: Vec4::ONE };
    /// Opaque yellow.
    pub const YELLOW: Self = Self {
        rgba: Vec4::new(1.0, 1.0, 0.0, 1.0),
    };

    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            rgba: Vec4::new(r, g, b, a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Vec4> for Color {
    fn from(rgba: Vec4) -> Self {
        Self { rgba }
    }
}
