//! Integration tests for the coordinator
//!
//! Tests the facade's ordering guarantees, views, and contract panics.

use lensing_foundation::{ErrorKind, Signature};
use lensing_storage::{Component, Coordinator, EcsConfig, System};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position(f32);

impl Component for Position {
    const NAME: &'static str = "Position";
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Speed(f32);

impl Component for Speed {
    const NAME: &'static str = "Speed";
}

#[derive(Debug, Default)]
struct Mover;

impl System for Mover {
    const NAME: &'static str = "Mover";
}

fn coordinator() -> Coordinator {
    let mut coordinator = Coordinator::new();
    let position = coordinator.register_component::<Position>();
    let speed = coordinator.register_component::<Speed>();
    coordinator.register_system::<Mover>();
    coordinator.set_system_signature::<Mover>(Signature::new().with(position).with(speed));
    coordinator
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn view_updates_every_member_in_place() {
    let mut coordinator = coordinator();
    let movers: Vec<_> = (0u8..10)
        .map(|i| {
            let e = coordinator.create_entity().unwrap();
            coordinator.add_component(e, Position(0.0));
            coordinator.add_component(e, Speed(f32::from(i)));
            e
        })
        .collect();
    let still = coordinator.create_entity().unwrap();
    coordinator.add_component(still, Position(5.0));

    let mut view = coordinator.view::<Mover>();
    for entity in view.members() {
        let speed = view.get::<Speed>(entity).0;
        view.get_mut::<Position>(entity).0 += speed * 2.0;
    }

    for (i, &e) in (0u8..).zip(&movers) {
        assert!((coordinator.component::<Position>(e).0 - f32::from(i) * 2.0).abs() < f32::EPSILON);
    }
    assert!((coordinator.component::<Position>(still).0 - 5.0).abs() < f32::EPSILON);
}

#[test]
fn structural_changes_are_deferred_after_iteration() {
    let mut coordinator = coordinator();
    for _ in 0..6 {
        let e = coordinator.create_entity().unwrap();
        coordinator.add_component(e, Position(0.0));
        coordinator.add_component(e, Speed(1.0));
    }

    let doomed: Vec<_> = coordinator
        .system_entities::<Mover>()
        .iter()
        .step_by(2)
        .collect();
    for e in &doomed {
        coordinator.remove_component::<Speed>(*e);
    }

    assert_eq!(coordinator.system_entities::<Mover>().len(), 3);
    for e in doomed {
        assert!(!coordinator.system_entities::<Mover>().contains(e));
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn capacity_error_is_returned_not_panicked() {
    let mut coordinator = Coordinator::with_config(EcsConfig::new().with_max_entities(2)).unwrap();
    coordinator.create_entity().unwrap();
    coordinator.create_entity().unwrap();

    let err = coordinator.create_entity().unwrap_err();
    assert_eq!(err.kind, ErrorKind::CapacityExceeded { limit: 2 });
}

#[test]
fn config_validation() {
    assert!(EcsConfig::default().validate().is_ok());
    assert_eq!(EcsConfig::default().max_entities, 5000);
    assert!(EcsConfig::new().with_max_entities(0).validate().is_err());
}

#[test]
fn recycled_entity_has_no_leftovers() {
    let mut coordinator = coordinator();
    let e = coordinator.create_entity().unwrap();
    coordinator.add_component(e, Position(1.0));
    coordinator.add_component(e, Speed(1.0));
    coordinator.destroy_entity(e);

    let reused = coordinator.create_entity().unwrap();
    assert_eq!(reused, e);
    assert!(coordinator.signature(reused).is_empty());
    assert!(!coordinator.has_component::<Position>(reused));
    assert!(!coordinator.system_entities::<Mover>().contains(reused));
}

// =============================================================================
// Contract Violations
// =============================================================================

#[test]
#[should_panic(expected = "component not found")]
fn reading_a_missing_component_panics() {
    let mut coordinator = coordinator();
    let e = coordinator.create_entity().unwrap();
    let _ = coordinator.component::<Speed>(e);
}

#[test]
#[should_panic(expected = "component already registered")]
fn registering_a_component_twice_panics() {
    let mut coordinator = coordinator();
    coordinator.register_component::<Position>();
}

#[test]
#[should_panic(expected = "system not registered")]
fn unknown_system_panics() {
    #[derive(Default)]
    struct Ghost;
    impl System for Ghost {
        const NAME: &'static str = "Ghost";
    }

    let coordinator = coordinator();
    let _ = coordinator.system_entities::<Ghost>();
}

#[test]
#[should_panic(expected = "entity not found")]
fn adding_to_a_dead_entity_panics() {
    let mut coordinator = coordinator();
    let e = coordinator.create_entity().unwrap();
    coordinator.destroy_entity(e);
    coordinator.add_component(e, Position(0.0));
}
