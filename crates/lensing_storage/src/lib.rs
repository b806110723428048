//! Entity, component and system storage for the lensing ECS.
//!
//! This crate provides:
//! - [`EntityRegistry`] - Entity handle allocation with a FIFO recycle queue
//! - [`PackedStore`] - Dense, swap-remove component storage per kind
//! - [`ComponentRegistry`] - Kind registration and type-erased store ownership
//! - [`SystemRegistry`] - Systems and their incrementally maintained members
//! - [`Coordinator`] - The facade collaborators talk to

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod coordinator;
pub mod entity;
pub mod packed;
pub mod system;

pub use component::{Component, ComponentRegistry};
pub use coordinator::{Coordinator, EcsConfig, SystemView};
pub use entity::EntityRegistry;
pub use packed::{ErasedStore, PackedStore};
pub use system::{EntitySet, System, SystemRegistry};
