//! `toybox-events` — event-sourcing / CQRS mechanics (no business rules).
//!
//! This crate provides the kernel: `Event`/`Command` abstractions, the
//! append-only event store, the synchronous in-process message bus, and
//! the projection fold. Domain crates bring the types; composition
//! happens in `toybox-runtime`.

pub mod bus;
pub mod command;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod in_memory_store;
pub mod projection;
pub mod store;

pub use bus::{EventHandler, HandlerError, Publish, PublishError, Subscribe};
pub use command::Command;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::CommandHandler;
pub use in_memory_bus::InMemoryMessageBus;
pub use in_memory_store::InMemoryEventStore;
pub use projection::{Projection, replay, replay_with};
pub use store::{EventSink, EventStore, EventStoreError, StoredEvent, UncommittedEvent};
