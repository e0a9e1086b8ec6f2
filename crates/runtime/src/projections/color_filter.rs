use toybox_events::Projection;
use toybox_toys::{Color, ToyEvent};

/// Names of toys ever added with a given color.
///
/// Tracks "ever added matching the color", **not** "currently present
/// and matching": entries are accumulated on `ToyAdded` and never
/// removed on `ToyRemoved`. The asymmetry is part of the contract and
/// scenario tests depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFilter {
    color: Color,
    names: Vec<String>,
}

impl ColorFilter {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            names: Vec::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Matching names, in add order (duplicates included: one entry per
    /// matching `ToyAdded` event).
    pub fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

impl Projection for ColorFilter {
    type Ev = ToyEvent;

    fn apply(&mut self, event: &ToyEvent) {
        match event {
            ToyEvent::ToyAdded(e) if e.toy.color == self.color => {
                self.names.push(e.toy.name.clone());
            }
            // Removal never trims the filtered view.
            ToyEvent::ToyAdded(_) | ToyEvent::ToyRemoved(_) => {}
        }
    }
}
