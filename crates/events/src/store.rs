//! Append-only event store abstractions.
//!
//! The store is the **persistence seam** for events. No storage
//! assumptions are made here: the in-memory implementation serves
//! tests/dev, and a durable backend can implement the same traits
//! transparently.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use crate::envelope::EventEnvelope;
use crate::event::Event;

/// An event ready to be appended to the log (not yet assigned a
/// sequence number).
///
/// The event store assigns sequence numbers during append; this is the
/// shape an event has in between decision and persistence.
///
/// Use [`UncommittedEvent::from_typed`] to build one from a typed domain
/// event: it serializes the event to JSON and captures the metadata
/// needed to deserialize it later, keeping the log domain-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncommittedEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: JsonValue,
}

impl UncommittedEvent {
    /// Convenience constructor from a typed domain event.
    pub fn from_typed<E>(event_id: Uuid, event: &E) -> Result<Self, EventStoreError>
    where
        E: Event + Serialize,
    {
        let payload = serde_json::to_value(event)
            .map_err(|e| EventStoreError::Serialize(e.to_string()))?;

        Ok(Self {
            event_id,
            event_type: event.event_type().to_string(),
            occurred_at: event.occurred_at(),
            payload,
        })
    }
}

/// A stored event in the append-only log (assigned a sequence number).
///
/// Sequence numbers are assigned by the event store during append and
/// are monotonically increasing, gap-free and immutable: once an event
/// holds position n, nothing else ever will.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: Uuid,

    /// Monotonically increasing position in the event log (1-based).
    pub sequence_number: u64,

    pub event_type: String,
    pub occurred_at: DateTime<Utc>,

    pub payload: JsonValue,
}

impl StoredEvent {
    /// Convert a stored event into an event envelope for publication.
    pub fn to_envelope(&self) -> EventEnvelope<JsonValue> {
        EventEnvelope::new(
            self.event_id,
            self.sequence_number,
            self.event_type.clone(),
            self.occurred_at,
            self.payload.clone(),
        )
    }
}

/// Event store operation error.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// Serializing a typed event payload failed.
    #[error("payload serialization failed: {0}")]
    Serialize(String),

    /// An internal lock was poisoned by a panicking writer.
    #[error("event store lock poisoned")]
    Poisoned,
}

/// Append-only storing capability (write-side view of the store).
///
/// This is deliberately a single-method interface: the write model needs
/// to append and nothing else (least privilege). Anything satisfying
/// this contract is substitutable - including a durable, networked
/// store.
pub trait EventSink: Send + Sync {
    /// Append one event to the end of the log.
    ///
    /// Implementations assign the next sequence number and must never
    /// reorder, rewrite or drop previously appended events.
    fn append(&self, event: UncommittedEvent) -> Result<StoredEvent, EventStoreError>;
}

/// Full event store: append plus full-log read.
///
/// `read()` returns the complete log in append order: for two events e1
/// appended before e2, e1 always precedes e2 in the result.
pub trait EventStore: EventSink {
    /// Read a stable snapshot of the full log, in append order.
    fn read(&self) -> Result<Vec<StoredEvent>, EventStoreError>;
}

impl<S> EventSink for Arc<S>
where
    S: EventSink + ?Sized,
{
    fn append(&self, event: UncommittedEvent) -> Result<StoredEvent, EventStoreError> {
        (**self).append(event)
    }
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn read(&self) -> Result<Vec<StoredEvent>, EventStoreError> {
        (**self).read()
    }
}
