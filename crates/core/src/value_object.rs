//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Drafts (form scratch state) are value objects: two drafts holding the same
/// field values are interchangeable, and "editing" one means replacing it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
