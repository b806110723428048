//! Integration tests for component signatures

use lensing_foundation::{ComponentTypeId, MAX_COMPONENTS, Signature};

fn id(index: usize) -> ComponentTypeId {
    ComponentTypeId::from_index(index).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn ids_cover_exactly_the_signature_width() {
    assert!(ComponentTypeId::from_index(0).is_some());
    assert!(ComponentTypeId::from_index(MAX_COMPONENTS - 1).is_some());
    assert!(ComponentTypeId::from_index(MAX_COMPONENTS).is_none());
}

#[test]
fn signature_from_ids() {
    let sig: Signature = [id(0), id(5), id(31)].into_iter().collect();
    assert_eq!(sig.len(), 3);
    assert!(sig.contains(id(5)));
    assert!(!sig.contains(id(4)));
    assert_eq!(sig.bits(), 1 | (1 << 5) | (1 << 31));
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn superset_matches_requirement() {
    let required = Signature::new().with(id(0)).with(id(3));
    let owner = required.with(id(7));

    assert!(owner.contains_all(required));
    assert!(!required.without(id(3)).contains_all(required));
    assert_eq!(owner & required, required);
}

#[test]
fn empty_requirement_matches_everything() {
    assert!(Signature::EMPTY.contains_all(Signature::EMPTY));
    assert!(Signature::new().with(id(9)).contains_all(Signature::EMPTY));
}

#[test]
fn set_and_reset() {
    let mut sig = Signature::new();
    sig.set(id(2), true);
    sig.set(id(4), true);
    sig.set(id(2), false);
    assert_eq!(sig.iter().collect::<Vec<_>>(), vec![id(4)]);

    sig.reset();
    assert!(sig.is_empty());
}
