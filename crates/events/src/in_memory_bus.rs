//! In-memory message bus.

use std::sync::RwLock;

use crate::bus::{EventHandler, Publish, PublishError, Subscribe};

/// In-memory pub/sub bus with synchronous fan-out.
///
/// - No IO / no async / no threads
/// - Handlers run on the publishing thread, in subscription order
/// - Fail-fast: the first handler error aborts delivery for that message
pub struct InMemoryMessageBus<M> {
    subscribers: RwLock<Vec<EventHandler<M>>>,
}

impl<M> InMemoryMessageBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|subs| subs.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryMessageBus<M> {
    fn default() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryMessageBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryMessageBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<M> Publish<M> for InMemoryMessageBus<M>
where
    M: Send + Sync,
{
    fn publish(&self, message: &M) -> Result<(), PublishError> {
        // Snapshot the registry so the lock is not held while handlers
        // run (a handler may itself subscribe).
        let handlers = {
            let subs = self.subscribers.read().map_err(|_| PublishError::Poisoned)?;
            subs.clone()
        };

        for (index, handler) in handlers.iter().enumerate() {
            handler(message).map_err(|source| {
                tracing::warn!(index, error = %source, "subscriber faulted; aborting delivery");
                PublishError::Handler { index, source }
            })?;
        }

        Ok(())
    }
}

impl<M> Subscribe<M> for InMemoryMessageBus<M>
where
    M: Send + Sync,
{
    fn subscribe(&self, handler: EventHandler<M>) {
        // If the lock is poisoned the registration is dropped; the
        // publish side reports Poisoned on its next call.
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(handler);
        }
    }
}
