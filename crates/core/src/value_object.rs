//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Derived views such as a purchase age or a target status have no identity;
/// two of them with the same fields are interchangeable. Implementors are
/// immutable: "changing" one means computing a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
