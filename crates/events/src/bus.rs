//! Event publishing/subscription abstraction (mechanics only).
//!
//! This module provides the **event bus pattern** - a pub/sub mechanism
//! for distributing events to multiple consumers (projections, handlers,
//! etc.).
//!
//! ## Delivery Model
//!
//! Delivery here is **synchronous and in-process**: `publish` invokes
//! every registered handler on the calling thread, in subscription
//! order, and does not return until each of them has run. This is what
//! keeps read models consistent with the log at the moment a command
//! returns - there is no window where an event is stored but not yet
//! projected.
//!
//! ## Fault Policy
//!
//! Fail-fast, no isolation: the first handler error propagates to the
//! publisher and aborts delivery to the remaining subscribers for that
//! event. A production system would want per-subscriber isolation with
//! fault aggregation; this kernel deliberately keeps the simpler
//! contract and surfaces the fault at the publish site.
//!
//! ## No Backlog Replay
//!
//! A subscriber registered after an event was published never receives
//! that past event. Consumers that need history replay it from the
//! event store instead (the store, not the bus, is the source of truth).

use std::sync::Arc;

use thiserror::Error;

/// Error raised by a subscriber while handling a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A subscriber callback, invoked once per published message.
pub type EventHandler<M> = Arc<dyn Fn(&M) -> Result<(), HandlerError> + Send + Sync>;

/// Publish operation error.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A subscriber faulted; delivery to later subscribers was aborted.
    #[error("subscriber {index} failed: {source}")]
    Handler {
        /// Position of the faulting subscriber in subscription order.
        index: usize,
        source: HandlerError,
    },

    /// The subscriber registry lock was poisoned.
    #[error("message bus lock poisoned")]
    Poisoned,
}

/// Publishing capability (write-side view of the bus).
///
/// Single-method interface: the write model publishes and cannot
/// subscribe (least privilege).
pub trait Publish<M>: Send + Sync {
    /// Deliver `message` to every currently registered subscriber, in
    /// subscription order, synchronously.
    fn publish(&self, message: &M) -> Result<(), PublishError>;
}

/// Subscribing capability (read-side view of the bus).
///
/// Single-method interface: read models subscribe and cannot publish.
pub trait Subscribe<M>: Send + Sync {
    /// Register a handler for all *future* published messages.
    ///
    /// Registration order determines delivery order among subscribers.
    fn subscribe(&self, handler: EventHandler<M>);
}

impl<B, M> Publish<M> for Arc<B>
where
    B: Publish<M> + ?Sized,
{
    fn publish(&self, message: &M) -> Result<(), PublishError> {
        (**self).publish(message)
    }
}

impl<B, M> Subscribe<M> for Arc<B>
where
    B: Subscribe<M> + ?Sized,
{
    fn subscribe(&self, handler: EventHandler<M>) {
        (**self).subscribe(handler)
    }
}
