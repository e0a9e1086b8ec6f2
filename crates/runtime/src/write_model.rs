//! Command execution pipeline (write side).
//!
//! The write model is the sole command-handling entry point. For every
//! command it:
//!
//! 1. decides the resulting events (pure, via [`CommandHandler`])
//! 2. appends each event to the store, **then** publishes it, in
//!    production order
//!
//! Append-before-publish per event is the consistency contract: an event
//! is never visible to subscribers before it is in the log, and because
//! the bus is synchronous, every read model has processed the event by
//! the time `execute` returns.

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use toybox_events::{
    CommandHandler, EventEnvelope, EventSink, EventStoreError, Publish, PublishError, StoredEvent,
    UncommittedEvent,
};

/// Command execution error.
#[derive(Debug, Error)]
pub enum ExecuteError<E>
where
    E: core::fmt::Debug,
{
    /// The command was rejected by decision logic; nothing was appended
    /// or published.
    #[error("command rejected: {0:?}")]
    Domain(E),

    /// Appending to the event store failed.
    #[error("event store failure: {0}")]
    Store(#[from] EventStoreError),

    /// Publication failed **after** a successful append: the event is in
    /// the log but one or more subscribers did not see it. Remaining
    /// events of the command are not processed.
    #[error("event publication failed after append: {0}")]
    Publish(#[from] PublishError),
}

/// The write model: decide, append, publish.
///
/// Constructed from the two narrow capabilities it needs - a storing
/// capability ([`EventSink`]) and a publishing capability ([`Publish`]).
/// It cannot read the log and it cannot subscribe.
#[derive(Debug)]
pub struct WriteModel<H, S, P> {
    handler: H,
    store: S,
    bus: P,
}

impl<H, S, P> WriteModel<H, S, P> {
    pub fn new(handler: H, store: S, bus: P) -> Self {
        Self {
            handler,
            store,
            bus,
        }
    }
}

impl<H, S, P> WriteModel<H, S, P>
where
    H: CommandHandler,
    H::Ev: Serialize,
    S: EventSink,
    P: Publish<EventEnvelope<JsonValue>>,
{
    /// Execute one command through the full pipeline.
    ///
    /// Returns the stored events (with assigned sequence numbers). Each
    /// event is appended and published before the next one is touched,
    /// so the log and every subscriber observe the events of one command
    /// in production order.
    pub fn execute(&self, command: H::Cmd) -> Result<Vec<StoredEvent>, ExecuteError<H::Error>> {
        let decided = self
            .handler
            .handle(command)
            .map_err(ExecuteError::Domain)?;

        let mut committed = Vec::with_capacity(decided.len());
        for event in &decided {
            let uncommitted = UncommittedEvent::from_typed(Uuid::now_v7(), event)?;
            let stored = self.store.append(uncommitted)?;
            self.bus.publish(&stored.to_envelope())?;

            tracing::debug!(
                sequence_number = stored.sequence_number,
                event_type = %stored.event_type,
                "event appended and published"
            );
            committed.push(stored);
        }

        Ok(committed)
    }
}
