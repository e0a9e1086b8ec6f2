use std::collections::HashMap;

use toybox_core::ToyId;
use toybox_events::Projection;
use toybox_toys::{Toy, ToyEvent};

/// Current toys in the box: `ToyId -> Toy`, last-write-wins.
///
/// - `ToyAdded` inserts or overwrites the entry for that id
/// - `ToyRemoved` deletes the entry if present (no-op otherwise)
///
/// Output ordering is first-add insertion order: overwriting an id that
/// is still present keeps its position; an id that was removed and later
/// re-added goes to the back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentToys {
    toys: HashMap<ToyId, Toy>,
    /// Ids of live entries, in first-add order.
    order: Vec<ToyId>,
}

impl CurrentToys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, toy_id: &ToyId) -> Option<&Toy> {
        self.toys.get(toy_id)
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toys.is_empty()
    }

    /// Current toy values, in first-add order.
    pub fn toys(&self) -> Vec<Toy> {
        self.order
            .iter()
            .filter_map(|id| self.toys.get(id).cloned())
            .collect()
    }

    /// Current toy names, in first-add order.
    pub fn names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.toys.get(id).map(|toy| toy.name.clone()))
            .collect()
    }
}

impl Projection for CurrentToys {
    type Ev = ToyEvent;

    fn apply(&mut self, event: &ToyEvent) {
        match event {
            ToyEvent::ToyAdded(e) => {
                if self.toys.insert(e.toy_id, e.toy.clone()).is_none() {
                    self.order.push(e.toy_id);
                }
            }
            ToyEvent::ToyRemoved(e) => {
                if self.toys.remove(&e.toy_id).is_some() {
                    self.order.retain(|id| id != &e.toy_id);
                }
            }
        }
    }
}
