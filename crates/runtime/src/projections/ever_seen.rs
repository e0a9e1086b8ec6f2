use std::collections::HashSet;

use toybox_events::Projection;
use toybox_toys::ToyEvent;

/// Every distinct toy name ever added, in first-seen order.
///
/// Grows on `ToyAdded` only and never shrinks: removal does not erase
/// the fact that a toy was once in the box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EverSeen {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl EverSeen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct names in first-seen order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }
}

impl Projection for EverSeen {
    type Ev = ToyEvent;

    fn apply(&mut self, event: &ToyEvent) {
        match event {
            ToyEvent::ToyAdded(e) => {
                if self.seen.insert(e.toy.name.clone()) {
                    self.order.push(e.toy.name.clone());
                }
            }
            // Monotone by design: removal never shrinks the set.
            ToyEvent::ToyRemoved(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use toybox_core::ToyId;
    use toybox_toys::{Color, Toy, ToyAdded, ToyRemoved};

    use super::*;

    fn added(n: u128, name: &str) -> ToyEvent {
        ToyEvent::ToyAdded(ToyAdded {
            toy_id: ToyId::from_uuid(Uuid::from_u128(n)),
            toy: Toy::new(name, Color::Red),
            occurred_at: Utc::now(),
        })
    }

    fn removed(n: u128) -> ToyEvent {
        ToyEvent::ToyRemoved(ToyRemoved {
            toy_id: ToyId::from_uuid(Uuid::from_u128(n)),
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn removal_does_not_shrink_the_set() {
        let mut projection = EverSeen::new();
        projection.apply(&added(1, "bear"));
        projection.apply(&removed(1));

        assert_eq!(projection.names(), vec!["bear"]);
    }

    #[test]
    fn duplicate_names_are_deduplicated() {
        let mut projection = EverSeen::new();
        projection.apply(&added(1, "bear"));
        projection.apply(&added(2, "car"));
        projection.apply(&added(3, "bear"));

        assert_eq!(projection.names(), vec!["bear", "car"]);
    }
}
