//! Gravitational lensing simulation built on the lensing ECS.
//!
//! This crate provides:
//! - [`components`] - Plain data attached to rays and the black hole
//! - [`LensingSystem`] - Schwarzschild null geodesic integration
//! - [`TrailSystem`] - Bounded position history per ray
//! - [`SphereRenderSystem`] / [`TrailRenderSystem`] - Vertex generation
//! - [`SimulationConfig`] - TOML configuration
//! - [`Simulation`] - Scene bootstrap and the tick loop
//!
//! Systems are driven through associated functions that receive the
//! [`Coordinator`](lensing_storage::Coordinator) explicitly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod components;
pub mod config;
pub mod lensing;
pub mod render;
pub mod scene;
pub mod simulation;
pub mod trail;

pub use components::{Color, GravityWell, Projectile, Spherical, Trail, Transform2D, Velocity2D};
pub use config::{BlackHoleConfig, RayConfig, SimulationConfig};
pub use lensing::{LensingConfig, LensingSystem};
pub use render::{
    DrawCommand, Primitive, SphereRenderSystem, TrailRenderSystem, VERTEX_STRIDE, VertexBatch,
};
pub use scene::{Scene, bootstrap};
pub use simulation::{Simulation, StepReport};
pub use trail::TrailSystem;
