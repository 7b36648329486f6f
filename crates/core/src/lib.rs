//! `eventsite-core` — client-side mirrors of the event-site resources.
//!
//! This crate contains **pure data** (no IO): entities, the drafts used as
//! form scratch state, request shapes and the validation shared by the create
//! and edit paths.

pub mod attendee;
pub mod entity;
pub mod error;
pub mod id;
pub mod session;
pub mod speaker;
pub mod stats;
pub mod todo;
pub mod value_object;
pub mod wire;

pub use attendee::{Attendee, DESIGNATIONS, RegisterRequest};
pub use entity::{Draft, Editable, Entity, require_non_blank};
pub use error::{DomainError, DomainResult, ServerMessage};
pub use id::{AttendeeId, SessionId, SpeakerId, TodoId};
pub use session::{Session, SessionDraft, SessionWithSpeaker, UpsertSession};
pub use speaker::{Speaker, SpeakerDraft, UpsertSpeaker};
pub use stats::{StatSlice, Stats};
pub use todo::{Todo, TodoDraft, TodoPatch};
pub use value_object::ValueObject;
