//! Entity, editable entity and draft traits.

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity whose editable fields can be copied into a draft.
pub trait Editable: Entity {
    type Draft: Draft;

    /// Copy the editable fields into fresh scratch state.
    fn to_draft(&self) -> Self::Draft;
}

/// Unsaved, locally-held copy of an entity's editable fields.
pub trait Draft: ValueObject + Default {
    /// Client-side check run before any network call.
    fn validate(&self) -> DomainResult<()>;

    /// The shape actually sent to the server (e.g. trimmed text).
    fn normalized(&self) -> Self {
        self.clone()
    }
}

/// Shared title/name rule: non-empty after trimming surrounding whitespace.
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}
