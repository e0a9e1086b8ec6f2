//! Value object trait: equality by value, not identity.

/// Marker trait for immutable domain values.
///
/// Value objects have no identity of their own; two instances with the
/// same attribute values are interchangeable. To "modify" one, build a
/// new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
