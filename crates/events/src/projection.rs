use crate::Event;

/// A projection builds a read model from an append-only event stream.
///
/// Projections implement the **CQRS read model pattern**: they fold
/// events (write model) into queryable state (read model). A projection
/// is fully determined by the event prefix it has observed - it has no
/// identity of its own and is disposable at any time.
///
/// ## Lifecycle
///
/// 1. **Subscribe**: the owning read model registers with the bus
/// 2. **Apply**: each delivered event incrementally updates state
/// 3. **Query**: reads are O(1) snapshots of maintained state
/// 4. **Rebuild**: [`replay`] folds the full log from empty state
///
/// Incremental application and a one-pass fold over the same event
/// sequence must produce identical state; tests hold both legs of that
/// equivalence against each other.
pub trait Projection {
    type Ev: Event;

    /// Apply a single event, updating the read model in place.
    fn apply(&mut self, event: &Self::Ev);
}

/// Rebuild a projection from scratch by folding the full event history.
///
/// This is the explicit recovery operation: mathematically equivalent to
/// incremental application, algorithmically O(n) where the incremental
/// path already paid that cost at publish time.
pub fn replay<'a, P>(events: impl IntoIterator<Item = &'a P::Ev>) -> P
where
    P: Projection + Default,
{
    replay_with(P::default, events)
}

/// [`replay`] for projections without a `Default` empty state (e.g. ones
/// constructed with a predicate). The factory produces the fresh
/// instance to fold into.
pub fn replay_with<'a, P>(
    factory: impl FnOnce() -> P,
    events: impl IntoIterator<Item = &'a P::Ev>,
) -> P
where
    P: Projection,
{
    let mut projection = factory();
    for event in events {
        projection.apply(event);
    }
    projection
}
