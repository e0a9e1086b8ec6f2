//! Integration tests for the full event-sourced pipeline.
//!
//! Command → WriteModel → EventStore → MessageBus → ReadModel.
//!
//! Verifies:
//! - the log preserves execution/production order
//! - incremental projections match a full-log replay
//! - last-write-wins, idempotent removal, ever-seen monotonicity
//! - the synchronous delivery and fail-fast fault contracts

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use proptest::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use toybox_core::ToyId;
use toybox_events::{
    EventEnvelope, EventStore, HandlerError, InMemoryEventStore, InMemoryMessageBus, Subscribe,
    replay, replay_with,
};
use toybox_toys::{AddToy, Color, RemoveToy, Toy, ToyCommand, ToyDecider, ToyEvent};

use crate::projections::{ColorFilter, CurrentToys, EverSeen};
use crate::read_model::ReadModel;
use crate::write_model::{ExecuteError, WriteModel};

type Bus = InMemoryMessageBus<EventEnvelope<JsonValue>>;
type Writer = WriteModel<ToyDecider, Arc<InMemoryEventStore>, Arc<Bus>>;

fn setup() -> (Writer, ReadModel, Arc<InMemoryEventStore>) {
    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<Bus> = Arc::new(InMemoryMessageBus::new());

    // Read model subscribes before the first command is issued.
    let read_model = ReadModel::new(&bus, Color::Green);
    let write_model = WriteModel::new(ToyDecider::new(), store.clone(), bus);

    (write_model, read_model, store)
}

fn toy_id(n: u128) -> ToyId {
    ToyId::from_uuid(Uuid::from_u128(n))
}

fn add(n: u128, name: &str, color: Color) -> ToyCommand {
    ToyCommand::AddToy(AddToy {
        toy_id: toy_id(n),
        toy: Toy::new(name, color),
        occurred_at: Utc::now(),
    })
}

fn remove(n: u128) -> ToyCommand {
    ToyCommand::RemoveToy(RemoveToy {
        toy_id: toy_id(n),
        occurred_at: Utc::now(),
    })
}

/// The reference scenario from the toybox domain.
fn reference_scenario() -> Vec<ToyCommand> {
    vec![
        add(1, "3D Toy", Color::Red),
        add(2, "4D Toy", Color::Green),
        remove(1),
        add(3, "car", Color::Blue),
        add(4, "bear", Color::Red),
        remove(3),
    ]
}

/// Decode the stored log back into typed domain events.
fn decoded_log(store: &InMemoryEventStore) -> Vec<ToyEvent> {
    store
        .read()
        .unwrap()
        .into_iter()
        .map(|stored| serde_json::from_value(stored.payload).unwrap())
        .collect()
}

#[test]
fn end_to_end_reference_scenario() {
    let (write_model, read_model, _store) = setup();

    for command in reference_scenario() {
        write_model.execute(command).unwrap();
    }

    assert_eq!(read_model.current_names(), vec!["4D Toy", "bear"]);
    assert_eq!(
        read_model.toys_ever_seen(),
        vec!["3D Toy", "4D Toy", "car", "bear"]
    );
    // Green view is unaffected by removals.
    assert_eq!(read_model.filtered_names(), vec!["4D Toy"]);

    let current = read_model.current_toys();
    assert_eq!(current[0], Toy::new("4D Toy", Color::Green));
    assert_eq!(current[1], Toy::new("bear", Color::Red));
}

#[test]
fn log_preserves_execution_order() {
    let (write_model, _read_model, store) = setup();

    for command in reference_scenario() {
        let stored = write_model.execute(command).unwrap();
        assert_eq!(stored.len(), 1);
    }

    let log = store.read().unwrap();
    let sequence: Vec<u64> = log.iter().map(|e| e.sequence_number).collect();
    assert_eq!(sequence, vec![1, 2, 3, 4, 5, 6]);

    let ids: Vec<ToyId> = decoded_log(&store).iter().map(ToyEvent::toy_id).collect();
    assert_eq!(
        ids,
        vec![toy_id(1), toy_id(2), toy_id(1), toy_id(3), toy_id(4), toy_id(3)]
    );

    let types: Vec<String> = log.into_iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![
            "toybox.toy.added",
            "toybox.toy.added",
            "toybox.toy.removed",
            "toybox.toy.added",
            "toybox.toy.added",
            "toybox.toy.removed",
        ]
    );
}

#[test]
fn removal_is_recorded_but_projection_update_is_idempotent() {
    let (write_model, read_model, store) = setup();

    write_model.execute(add(1, "bear", Color::Red)).unwrap();
    write_model.execute(remove(1)).unwrap();
    write_model.execute(remove(1)).unwrap();

    // Both removals hit the log; the second is a projection no-op.
    assert_eq!(store.read().unwrap().len(), 3);
    assert!(read_model.current_names().is_empty());
    assert_eq!(read_model.toys_ever_seen(), vec!["bear"]);
}

#[test]
fn duplicate_add_resolves_last_write_wins() {
    let (write_model, read_model, store) = setup();

    write_model.execute(add(1, "v1", Color::Red)).unwrap();
    write_model.execute(add(1, "v2", Color::Blue)).unwrap();

    assert_eq!(store.read().unwrap().len(), 2);
    assert_eq!(read_model.current_names(), vec!["v2"]);
    assert_eq!(read_model.toys_ever_seen(), vec!["v1", "v2"]);
}

#[test]
fn incremental_projections_match_full_replay() {
    let (write_model, read_model, store) = setup();

    for command in reference_scenario() {
        write_model.execute(command).unwrap();
    }

    let history = decoded_log(&store);

    let current: CurrentToys = replay(history.iter());
    assert_eq!(current.names(), read_model.current_names());
    assert_eq!(current.toys(), read_model.current_toys());

    let ever_seen: EverSeen = replay(history.iter());
    assert_eq!(ever_seen.names(), read_model.toys_ever_seen());

    let filtered = replay_with(|| ColorFilter::new(Color::Green), history.iter());
    assert_eq!(filtered.names(), read_model.filtered_names());
}

#[test]
fn late_subscriber_misses_earlier_events() {
    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<Bus> = Arc::new(InMemoryMessageBus::new());
    let write_model = WriteModel::new(ToyDecider::new(), store.clone(), bus.clone());

    write_model.execute(add(1, "bear", Color::Red)).unwrap();

    // No backlog replay: the earlier event is gone for this subscriber.
    let read_model = ReadModel::new(&bus, Color::Green);
    assert!(read_model.current_names().is_empty());

    write_model.execute(add(2, "car", Color::Blue)).unwrap();
    assert_eq!(read_model.current_names(), vec!["car"]);
    assert_eq!(store.read().unwrap().len(), 2);
}

#[test]
fn faulting_subscriber_aborts_delivery_and_surfaces_at_execute() {
    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<Bus> = Arc::new(InMemoryMessageBus::new());

    bus.subscribe(Arc::new(|_: &EventEnvelope<JsonValue>| {
        Err(HandlerError::new("projection offline"))
    }));
    let read_model = ReadModel::new(&bus, Color::Green);
    let write_model = WriteModel::new(ToyDecider::new(), store.clone(), bus);

    let err = write_model.execute(add(1, "bear", Color::Red)).unwrap_err();
    assert!(matches!(err, ExecuteError::Publish(_)));

    // The event was appended before publication failed; the read model
    // behind the faulting subscriber never saw it.
    assert_eq!(store.read().unwrap().len(), 1);
    assert!(read_model.current_names().is_empty());
}

#[test]
fn rejected_command_appends_and_publishes_nothing() {
    let (write_model, read_model, store) = setup();

    let err = write_model.execute(add(1, "   ", Color::Red)).unwrap_err();
    assert!(matches!(err, ExecuteError::Domain(_)));

    assert!(store.read().unwrap().is_empty());
    assert!(read_model.current_names().is_empty());
    assert!(read_model.toys_ever_seen().is_empty());
}

#[test]
fn foreign_envelopes_on_a_shared_bus_are_skipped() {
    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<Bus> = Arc::new(InMemoryMessageBus::new());
    let read_model = ReadModel::new(&bus, Color::Green);
    let write_model = WriteModel::new(ToyDecider::new(), store, bus.clone());

    let foreign = EventEnvelope::new(
        Uuid::now_v7(),
        1,
        "warehouse.pallet.moved",
        Utc::now(),
        serde_json::json!({ "pallet": 7 }),
    );
    toybox_events::Publish::publish(&bus, &foreign).unwrap();

    write_model.execute(add(1, "bear", Color::Red)).unwrap();
    assert_eq!(read_model.current_names(), vec!["bear"]);
}

#[test]
fn every_subscriber_has_processed_the_event_before_execute_returns() {
    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<Bus> = Arc::new(InMemoryMessageBus::new());

    let deliveries = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let deliveries = deliveries.clone();
        bus.subscribe(Arc::new(move |_: &EventEnvelope<JsonValue>| {
            deliveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
    }
    let write_model = WriteModel::new(ToyDecider::new(), store, bus);

    write_model.execute(add(1, "bear", Color::Red)).unwrap();
    assert_eq!(deliveries.load(Ordering::SeqCst), 3);
}

fn arb_command() -> impl Strategy<Value = ToyCommand> {
    let names = prop::sample::select(vec!["bear", "car", "frog", "kite", "drum"]);
    let colors = prop_oneof![Just(Color::Red), Just(Color::Green), Just(Color::Blue)];

    prop_oneof![
        (0u128..5, names, colors).prop_map(|(n, name, color)| add(n, name, color)),
        (0u128..5u128).prop_map(remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: after any command sequence, incremental projection
    /// state equals a one-pass fold of the log from empty state.
    #[test]
    fn incremental_equals_replay_for_arbitrary_sequences(
        commands in prop::collection::vec(arb_command(), 0..40)
    ) {
        let (write_model, read_model, store) = setup();
        for command in commands {
            write_model.execute(command).unwrap();
        }

        let history = decoded_log(&store);

        let current: CurrentToys = replay(history.iter());
        prop_assert_eq!(current.names(), read_model.current_names());

        let ever_seen: EverSeen = replay(history.iter());
        prop_assert_eq!(ever_seen.names(), read_model.toys_ever_seen());

        let filtered = replay_with(|| ColorFilter::new(Color::Green), history.iter());
        prop_assert_eq!(filtered.names(), read_model.filtered_names());
    }

    /// Property: the ever-seen set never shrinks; at every prefix it
    /// extends the set at any earlier prefix.
    #[test]
    fn ever_seen_is_monotone_over_prefixes(
        commands in prop::collection::vec(arb_command(), 0..40)
    ) {
        let decider = ToyDecider::new();
        let mut projection = EverSeen::new();
        let mut previous: Vec<String> = Vec::new();

        for command in commands {
            for event in toybox_events::CommandHandler::handle(&decider, command).unwrap() {
                toybox_events::Projection::apply(&mut projection, &event);

                let now = projection.names();
                prop_assert!(now.len() >= previous.len());
                prop_assert!(now.starts_with(&previous));
                previous = now;
            }
        }
    }

    /// Property: sequence numbers are exactly 1..=n in append order for
    /// any executed command sequence.
    #[test]
    fn log_sequence_is_gap_free(
        commands in prop::collection::vec(arb_command(), 0..40)
    ) {
        let (write_model, _read_model, store) = setup();
        for command in commands {
            write_model.execute(command).unwrap();
        }

        let log = store.read().unwrap();
        for (idx, stored) in log.iter().enumerate() {
            prop_assert_eq!(stored.sequence_number, idx as u64 + 1);
        }
    }
}
