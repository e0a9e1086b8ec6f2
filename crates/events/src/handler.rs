use crate::{Command, Event};

/// Handles a command and emits events (decision logic abstraction).
///
/// This is the pure core of the write path: given a command, decide
/// which events it produces. Implementations must be deterministic and
/// free of side effects - persistence and publication happen around
/// this seam, not inside it.
///
/// The error type is associated because rejection reasons are
/// domain-specific.
pub trait CommandHandler {
    type Cmd: Command;
    type Ev: Event;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn handle(&self, command: Self::Cmd) -> Result<Vec<Self::Ev>, Self::Error>;
}
