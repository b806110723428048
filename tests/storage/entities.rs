//! Integration tests for the entity registry
//!
//! Tests creation, recycling order, capacity, and signature storage.

use lensing_foundation::{ComponentTypeId, Signature};
use lensing_storage::EntityRegistry;

// =============================================================================
// Creation and Recycling
// =============================================================================

#[test]
fn fresh_indices_are_sequential() {
    let mut registry = EntityRegistry::default();
    let indices: Vec<_> = (0..5).map(|_| registry.create().unwrap().index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn destroyed_handles_are_reused_in_destruction_order() {
    let mut registry = EntityRegistry::default();
    let handles: Vec<_> = (0..4).map(|_| registry.create().unwrap()).collect();

    registry.destroy(handles[2]).unwrap();
    registry.destroy(handles[0]).unwrap();
    registry.destroy(handles[3]).unwrap();

    assert_eq!(registry.create().unwrap(), handles[2]);
    assert_eq!(registry.create().unwrap(), handles[0]);
    assert_eq!(registry.create().unwrap(), handles[3]);
    assert_eq!(registry.create().unwrap().index(), 4);
}

// =============================================================================
// Capacity
// =============================================================================

#[test]
fn default_capacity_allows_five_thousand_live_entities() {
    let mut registry = EntityRegistry::default();
    for _ in 0..5000 {
        registry.create().unwrap();
    }

    let err = registry.create().unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(registry.len(), 5000);
}

#[test]
fn destroying_frees_capacity() {
    let mut registry = EntityRegistry::new(1);
    let e = registry.create().unwrap();
    assert!(registry.create().is_err());

    registry.destroy(e).unwrap();
    assert_eq!(registry.create().unwrap(), e);
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn signature_survives_until_destroy() {
    let mut registry = EntityRegistry::default();
    let e = registry.create().unwrap();
    let sig = Signature::from(ComponentTypeId::from_index(6).unwrap());

    registry.set_signature(e, sig).unwrap();
    assert_eq!(registry.signature(e).unwrap(), sig);
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![(e, sig)]);

    registry.destroy(e).unwrap();
    assert!(registry.iter().next().is_none());
}
