//! Demo entry point: wires the kernel and runs the reference scenario.
//!
//! Orchestration glue only - the core contract lives in the library
//! crates.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use toybox_core::ToyId;
use toybox_events::{EventEnvelope, EventStore, InMemoryEventStore, InMemoryMessageBus};
use toybox_runtime::{ReadModel, WriteModel};
use toybox_toys::{AddToy, Color, RemoveToy, Toy, ToyCommand, ToyDecider};

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

fn main() -> anyhow::Result<()> {
    toybox_observability::init();

    let store = Arc::new(InMemoryEventStore::new());
    let bus: Arc<InMemoryMessageBus<EventEnvelope<JsonValue>>> =
        Arc::new(InMemoryMessageBus::new());

    // The read model subscribes first so no events are missed.
    let read_model = ReadModel::new(&bus, Color::Green);
    let write_model = WriteModel::new(ToyDecider::new(), store.clone(), bus);

    let scenario = vec![
        add(1, "3D Toy", Color::Red),
        add(2, "4D Toy", Color::Green),
        remove(1),
        add(3, "car", Color::Blue),
        add(4, "bear", Color::Red),
        remove(3),
    ];

    for command in scenario {
        write_model
            .execute(command)
            .context("command execution failed")?;
    }

    println!("Toys ever seen:  {:?}", read_model.toys_ever_seen());
    println!("Current toys:    {:?}", read_model.current_names());
    println!(
        "{} toys ever:    {:?}",
        read_model.filter_color(),
        read_model.filtered_names()
    );

    let log = store.read().context("reading the event log failed")?;
    tracing::info!(events = log.len(), "event log at shutdown");
    for stored in &log {
        tracing::debug!(
            sequence_number = stored.sequence_number,
            event_type = %stored.event_type,
            "logged event"
        );
    }

    Ok(())
}
