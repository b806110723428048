//! Integration tests for system membership
//!
//! Tests membership tracking as component ownership changes.

use lensing_foundation::Signature;
use lensing_storage::{Component, Coordinator, System};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Transform2D(f32, f32);

impl Component for Transform2D {
    const NAME: &'static str = "Transform2D";
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct GravityWell(f32);

impl Component for GravityWell {
    const NAME: &'static str = "GravityWell";
}

#[derive(Debug, Default)]
struct WellSystem;

impl System for WellSystem {
    const NAME: &'static str = "WellSystem";
}

#[derive(Debug, Default)]
struct Idle;

impl System for Idle {
    const NAME: &'static str = "Idle";
}

fn coordinator() -> Coordinator {
    let mut coordinator = Coordinator::new();
    let transform = coordinator.register_component::<Transform2D>();
    let well = coordinator.register_component::<GravityWell>();
    coordinator.register_system::<WellSystem>();
    coordinator.set_system_signature::<WellSystem>(Signature::new().with(transform).with(well));
    coordinator
}

// =============================================================================
// Membership
// =============================================================================

#[test]
fn membership_tracks_the_required_combination() {
    let mut coordinator = coordinator();
    let a = coordinator.create_entity().unwrap();

    coordinator.add_component(a, Transform2D::default());
    assert!(!coordinator.system_entities::<WellSystem>().contains(a));

    coordinator.add_component(a, GravityWell(1.0));
    assert!(coordinator.system_entities::<WellSystem>().contains(a));

    coordinator.remove_component::<GravityWell>(a);
    assert!(!coordinator.system_entities::<WellSystem>().contains(a));
}

#[test]
fn attach_order_does_not_matter() {
    let mut coordinator = coordinator();
    let a = coordinator.create_entity().unwrap();
    let b = coordinator.create_entity().unwrap();

    coordinator.add_component(a, Transform2D::default());
    coordinator.add_component(a, GravityWell(1.0));
    coordinator.add_component(b, GravityWell(2.0));
    coordinator.add_component(b, Transform2D::default());

    let members = coordinator.system_entities::<WellSystem>();
    assert_eq!(members.len(), 2);
    assert!(members.contains(a) && members.contains(b));
}

#[test]
fn system_without_signature_has_no_members() {
    let mut coordinator = coordinator();
    coordinator.register_system::<Idle>();
    let a = coordinator.create_entity().unwrap();
    coordinator.add_component(a, Transform2D::default());

    assert_eq!(coordinator.system_signature::<Idle>(), None);
    assert!(coordinator.system_entities::<Idle>().is_empty());
}

#[test]
fn setting_a_signature_late_includes_existing_entities() {
    let mut coordinator = coordinator();
    coordinator.register_system::<Idle>();
    let a = coordinator.create_entity().unwrap();
    coordinator.add_component(a, Transform2D::default());

    let transform = coordinator.component_type::<Transform2D>();
    coordinator.set_system_signature::<Idle>(Signature::from(transform));

    assert_eq!(coordinator.system_entities::<Idle>().as_slice(), &[a]);
}

#[test]
fn empty_requirement_admits_fresh_and_recycled_entities() {
    let mut coordinator = coordinator();
    coordinator.register_system::<Idle>();
    coordinator.set_system_signature::<Idle>(Signature::EMPTY);

    let a = coordinator.create_entity().unwrap();
    assert!(coordinator.system_entities::<Idle>().contains(a));

    coordinator.add_component(a, Transform2D::default());
    coordinator.remove_component::<Transform2D>(a);
    assert!(coordinator.system_entities::<Idle>().contains(a));

    coordinator.destroy_entity(a);
    assert!(coordinator.system_entities::<Idle>().is_empty());

    let b = coordinator.create_entity().unwrap();
    let c = coordinator.create_entity().unwrap();
    let members = coordinator.system_entities::<Idle>();
    assert_eq!(members.len(), 2);
    assert!(members.contains(b) && members.contains(c));
    assert!(!coordinator.system_entities::<WellSystem>().contains(b));
}

#[test]
fn destroy_leaves_every_membership_set() {
    let mut coordinator = coordinator();
    let a = coordinator.create_entity().unwrap();
    coordinator.add_component(a, Transform2D::default());
    coordinator.add_component(a, GravityWell(1.0));

    coordinator.destroy_entity(a);
    assert!(coordinator.system_entities::<WellSystem>().is_empty());
}
