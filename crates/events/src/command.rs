/// A transient instruction handled by the write model (command abstraction).
///
/// Commands represent **intent** - a request to perform an action. They
/// are not persisted and are transformed into events (which are).
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "Add toy")
/// - **Event**: Fact that something happened (e.g., "ToyAdded { .. }")
///
/// Commands are rejected if invalid (validation errors). Events represent
/// accepted changes.
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: Commands may be copied for logging, tests, etc.
/// - **Send + Sync + 'static**: Commands own all their data and can cross
///   thread boundaries.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {}
