//! Property tests over random coordinator operation sequences
//!
//! After every operation: each store is packed and its entity/slot mapping is
//! a bijection, signatures mirror store ownership, system membership mirrors
//! signatures, and destroyed entities leave no trace. Required signatures are
//! also reset while entities are live, including the empty signature.

use lensing_foundation::{Entity, Signature};
use lensing_storage::{Component, Coordinator, PackedStore, System};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

#[derive(Debug, Clone, Copy, PartialEq)]
struct A(u32);
impl Component for A {
    const NAME: &'static str = "A";
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct B(u32);
impl Component for B {
    const NAME: &'static str = "B";
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct C(u32);
impl Component for C {
    const NAME: &'static str = "C";
}

#[derive(Default)]
struct NeedsAB;
impl System for NeedsAB {
    const NAME: &'static str = "NeedsAB";
}

#[derive(Default)]
struct NeedsC;
impl System for NeedsC {
    const NAME: &'static str = "NeedsC";
}

#[derive(Default)]
struct Everyone;
impl System for Everyone {
    const NAME: &'static str = "Everyone";
}

#[derive(Default)]
struct Shifting;
impl System for Shifting {
    const NAME: &'static str = "Shifting";
}

#[derive(Debug, Clone)]
enum Op {
    Create,
    Destroy(usize),
    Toggle(u8, usize),
    Resign(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Create),
        1 => any::<usize>().prop_map(Op::Destroy),
        5 => (0u8..3, any::<usize>()).prop_map(|(kind, pick)| Op::Toggle(kind, pick)),
        1 => (0u8..8).prop_map(Op::Resign),
    ]
}

fn coordinator() -> Coordinator {
    let mut coordinator = Coordinator::new();
    let a = coordinator.register_component::<A>();
    let b = coordinator.register_component::<B>();
    let c = coordinator.register_component::<C>();
    coordinator.register_system::<NeedsAB>();
    coordinator.register_system::<NeedsC>();
    coordinator.register_system::<Everyone>();
    coordinator.register_system::<Shifting>();
    coordinator.set_system_signature::<NeedsAB>(Signature::new().with(a).with(b));
    coordinator.set_system_signature::<NeedsC>(Signature::from(c));
    coordinator.set_system_signature::<Everyone>(Signature::EMPTY);
    coordinator
}

/// Every subset of {A, B, C}, picked by the low three bits.
fn subset(coordinator: &Coordinator, bits: u8) -> Signature {
    let ids = [
        coordinator.component_type::<A>(),
        coordinator.component_type::<B>(),
        coordinator.component_type::<C>(),
    ];
    ids.into_iter()
        .enumerate()
        .filter(|&(i, _)| bits & (1 << i) != 0)
        .fold(Signature::EMPTY, |signature, (_, id)| signature.with(id))
}

fn toggle<T: Component>(coordinator: &mut Coordinator, entity: Entity, value: T) {
    if coordinator.has_component::<T>(entity) {
        coordinator.remove_component::<T>(entity);
    } else {
        coordinator.add_component(entity, value);
    }
}

fn check_store<T: Component>(coordinator: &Coordinator) -> Result<(), TestCaseError> {
    let store: &PackedStore<T> = coordinator.components().store::<T>().unwrap();
    let id = coordinator.component_type::<T>();

    prop_assert_eq!(store.entities().len(), store.len());
    prop_assert_eq!(store.values().len(), store.len());
    for (slot, &entity) in store.entities().iter().enumerate() {
        prop_assert_eq!(store.slot_of(entity), Some(slot));
        prop_assert!(coordinator.is_alive(entity));
    }
    for entity in coordinator.entities() {
        let owns = store.contains(entity);
        prop_assert_eq!(coordinator.signature(entity).contains(id), owns);
        if let Some(slot) = store.slot_of(entity) {
            prop_assert_eq!(store.entity_at(slot), Some(entity));
        }
    }
    Ok(())
}

fn check_system<S: System>(coordinator: &Coordinator) -> Result<(), TestCaseError> {
    let members = coordinator.system_entities::<S>();
    let Some(required) = coordinator.system_signature::<S>() else {
        prop_assert!(members.is_empty());
        return Ok(());
    };

    for entity in coordinator.entities() {
        let matches = coordinator.signature(entity).contains_all(required);
        prop_assert_eq!(members.contains(entity), matches);
    }
    for entity in members {
        prop_assert!(coordinator.is_alive(entity));
    }
    Ok(())
}

fn check_all(coordinator: &Coordinator) -> Result<(), TestCaseError> {
    check_store::<A>(coordinator)?;
    check_store::<B>(coordinator)?;
    check_store::<C>(coordinator)?;
    check_system::<NeedsAB>(coordinator)?;
    check_system::<NeedsC>(coordinator)?;
    check_system::<Everyone>(coordinator)?;
    check_system::<Shifting>(coordinator)?;
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 1..150)) {
        let mut coordinator = coordinator();
        let mut live: Vec<Entity> = Vec::new();
        let mut counter = 0u32;

        for op in ops {
            counter += 1;
            match op {
                Op::Create => live.push(coordinator.create_entity().unwrap()),
                Op::Destroy(pick) if !live.is_empty() => {
                    let entity = live.swap_remove(pick % live.len());
                    coordinator.destroy_entity(entity);

                    prop_assert!(!coordinator.is_alive(entity));
                    prop_assert!(!coordinator.components().contains_entity(entity));
                    prop_assert!(!coordinator.system_entities::<NeedsAB>().contains(entity));
                    prop_assert!(!coordinator.system_entities::<NeedsC>().contains(entity));
                    prop_assert!(!coordinator.system_entities::<Everyone>().contains(entity));
                    prop_assert!(!coordinator.system_entities::<Shifting>().contains(entity));
                }
                Op::Toggle(kind, pick) if !live.is_empty() => {
                    let entity = live[pick % live.len()];
                    match kind {
                        0 => toggle(&mut coordinator, entity, A(counter)),
                        1 => toggle(&mut coordinator, entity, B(counter)),
                        _ => toggle(&mut coordinator, entity, C(counter)),
                    }
                }
                Op::Resign(bits) => {
                    let required = subset(&coordinator, bits);
                    coordinator.set_system_signature::<Shifting>(required);
                    prop_assert_eq!(coordinator.system_signature::<Shifting>(), Some(required));
                }
                Op::Destroy(_) | Op::Toggle(..) => {}
            }

            check_all(&coordinator)?;
            prop_assert_eq!(coordinator.entity_count(), live.len());
            prop_assert_eq!(coordinator.system_entities::<Everyone>().len(), live.len());
        }
    }

    #[test]
    fn values_follow_their_entity_through_swaps(count in 2usize..60, removals in prop::collection::vec(any::<usize>(), 0..60)) {
        let mut coordinator = coordinator();
        let mut live: Vec<(Entity, u32)> = Vec::new();
        for i in 0..count {
            let entity = coordinator.create_entity().unwrap();
            let tag = u32::try_from(i).unwrap();
            coordinator.add_component(entity, A(tag));
            live.push((entity, tag));
        }

        for pick in removals {
            if live.is_empty() {
                break;
            }
            let (entity, tag) = live.swap_remove(pick % live.len());
            prop_assert_eq!(coordinator.remove_component::<A>(entity), A(tag));
            for &(other, other_tag) in &live {
                prop_assert_eq!(*coordinator.component::<A>(other), A(other_tag));
            }
        }
    }
}
