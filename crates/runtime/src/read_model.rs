//! The read model: subscribed projections behind snapshot queries.

use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;

use toybox_events::{EventEnvelope, HandlerError, Projection, Subscribe};
use toybox_toys::{Color, Toy, ToyEvent};

use crate::projections::{ColorFilter, CurrentToys, EverSeen};

/// All projection state owned by one read model, updated together so a
/// query never observes one projection ahead of another.
#[derive(Debug)]
struct Projections {
    current: CurrentToys,
    ever_seen: EverSeen,
    color_filter: ColorFilter,
}

/// Read model over the toybox event stream.
///
/// Subscribes in its constructor - before any command can have been
/// issued through a write model built afterwards - so no events are
/// missed. Each delivered event incrementally updates all projections;
/// queries are snapshot reads of maintained state (no log replay).
///
/// Envelopes whose payload is not a [`ToyEvent`] are skipped: the bus
/// may be shared with other domains.
#[derive(Debug)]
pub struct ReadModel {
    state: Arc<RwLock<Projections>>,
    filter_color: Color,
}

impl ReadModel {
    /// Construct and immediately subscribe to the bus.
    ///
    /// `filter_color` parameterizes the filtered view (e.g. green toys).
    pub fn new<B>(bus: &B, filter_color: Color) -> Self
    where
        B: Subscribe<EventEnvelope<JsonValue>> + ?Sized,
    {
        let state = Arc::new(RwLock::new(Projections {
            current: CurrentToys::new(),
            ever_seen: EverSeen::new(),
            color_filter: ColorFilter::new(filter_color),
        }));

        let handler_state = Arc::clone(&state);
        bus.subscribe(Arc::new(move |envelope: &EventEnvelope<JsonValue>| {
            let event: ToyEvent = match serde_json::from_value(envelope.payload().clone()) {
                Ok(event) => event,
                Err(_) => {
                    // Foreign payload on a shared bus; not ours to project.
                    tracing::trace!(event_type = envelope.event_type(), "skipping foreign event");
                    return Ok(());
                }
            };

            let mut projections = handler_state
                .write()
                .map_err(|_| HandlerError::new("read model state lock poisoned"))?;
            projections.current.apply(&event);
            projections.ever_seen.apply(&event);
            projections.color_filter.apply(&event);

            tracing::trace!(
                sequence_number = envelope.sequence_number(),
                event_type = envelope.event_type(),
                "projections updated"
            );
            Ok(())
        }));

        Self {
            state,
            filter_color,
        }
    }

    /// Toys currently in the box, in first-add order.
    pub fn current_toys(&self) -> Vec<Toy> {
        self.read(|p| p.current.toys())
    }

    /// Names of toys currently in the box, in first-add order.
    pub fn current_names(&self) -> Vec<String> {
        self.read(|p| p.current.names())
    }

    /// Distinct toy names ever added, in first-seen order.
    pub fn toys_ever_seen(&self) -> Vec<String> {
        self.read(|p| p.ever_seen.names())
    }

    /// Names of toys ever added with the filter color, in add order.
    pub fn filtered_names(&self) -> Vec<String> {
        self.read(|p| p.color_filter.names())
    }

    /// The color this read model's filtered view tracks.
    pub fn filter_color(&self) -> Color {
        self.filter_color
    }

    fn read<T: Default>(&self, f: impl FnOnce(&Projections) -> T) -> T {
        self.state.read().map(|p| f(&p)).unwrap_or_default()
    }
}
