//! Lensing - a minimal ECS runtime and a 2D gravitational lensing simulation
//!
//! This crate re-exports all layers of the workspace for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: lensing_engine     — Components, lensing and trail systems, vertex builders, config
//! Layer 1: lensing_storage    — Entity/component/system registries and the Coordinator
//! Layer 0: lensing_foundation — Core types (Entity, Signature, Error)
//! ```

pub use lensing_engine as engine;
pub use lensing_foundation as foundation;
pub use lensing_storage as storage;
