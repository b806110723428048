//! Core types shared by every layer of the lensing workspace.
//!
//! This crate provides:
//! - [`Entity`] - Opaque, recyclable entity handles
//! - [`ComponentTypeId`] - Dense ids assigned to registered component kinds
//! - [`Signature`] - Fixed-width bitset of the component kinds an entity owns
//! - [`Error`] - Error kinds for registry and storage operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod signature;

pub use entity::{DEFAULT_MAX_ENTITIES, Entity};
pub use error::{Error, ErrorKind, Result};
pub use signature::{ComponentTypeId, MAX_COMPONENTS, Signature};
