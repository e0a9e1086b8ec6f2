//! In-memory event store.

use std::sync::RwLock;

use crate::store::{EventSink, EventStore, EventStoreError, StoredEvent, UncommittedEvent};

/// In-memory append-only event store.
///
/// Single global log, single-writer model: no synchronization beyond a
/// lock is needed to preserve total order. Intended for tests/dev and
/// as the reference implementation of the append/read contract.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    log: RwLock<Vec<StoredEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events appended so far.
    pub fn len(&self) -> usize {
        self.log.read().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for InMemoryEventStore {
    fn append(&self, event: UncommittedEvent) -> Result<StoredEvent, EventStoreError> {
        let mut log = self.log.write().map_err(|_| EventStoreError::Poisoned)?;

        let stored = StoredEvent {
            event_id: event.event_id,
            sequence_number: log.len() as u64 + 1,
            event_type: event.event_type,
            occurred_at: event.occurred_at,
            payload: event.payload,
        };

        tracing::trace!(
            sequence_number = stored.sequence_number,
            event_type = %stored.event_type,
            "event appended"
        );

        log.push(stored.clone());
        Ok(stored)
    }
}

impl EventStore for InMemoryEventStore {
    fn read(&self) -> Result<Vec<StoredEvent>, EventStoreError> {
        let log = self.log.read().map_err(|_| EventStoreError::Poisoned)?;
        Ok(log.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn uncommitted(n: u128) -> UncommittedEvent {
        UncommittedEvent {
            event_id: Uuid::from_u128(n),
            event_type: "test.event".to_string(),
            occurred_at: Utc::now(),
            payload: json!({ "n": n }),
        }
    }

    #[test]
    fn append_assigns_monotonic_sequence_numbers() {
        let store = InMemoryEventStore::new();

        let first = store.append(uncommitted(1)).unwrap();
        let second = store.append(uncommitted(2)).unwrap();

        assert_eq!(first.sequence_number, 1);
        assert_eq!(second.sequence_number, 2);
    }

    #[test]
    fn read_returns_events_in_append_order() {
        let store = InMemoryEventStore::new();
        for n in 1..=5 {
            store.append(uncommitted(n)).unwrap();
        }

        let log = store.read().unwrap();
        let ids: Vec<Uuid> = log.iter().map(|e| e.event_id).collect();
        let expected: Vec<Uuid> = (1..=5).map(Uuid::from_u128).collect();
        assert_eq!(ids, expected);

        let seqs: Vec<u64> = log.iter().map(|e| e.sequence_number).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn read_is_a_stable_snapshot() {
        let store = InMemoryEventStore::new();
        store.append(uncommitted(1)).unwrap();

        let snapshot = store.read().unwrap();
        store.append(uncommitted(2)).unwrap();

        // The earlier snapshot is unaffected by later appends.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.read().unwrap().len(), 2);
    }
}
