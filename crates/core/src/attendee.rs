//! Attendees and public registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require_non_blank};
use crate::error::DomainResult;
use crate::id::AttendeeId;
use crate::value_object::ValueObject;

/// Designations offered by the registration form.
pub const DESIGNATIONS: [&str; 6] = [
    "Software Engineer",
    "Product Manager",
    "Designer",
    "Data Scientist",
    "DevOps Engineer",
    "Other",
];

/// A registered attendee (read-only on the client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: AttendeeId,
    pub full_name: String,
    pub email: String,
    pub designation: String,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    /// Case-insensitive substring match on name or email. Empty terms match all.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.full_name.to_lowercase().contains(&term) || self.email.to_lowercase().contains(&term)
    }
}

impl Entity for Attendee {
    type Id = AttendeeId;

    fn id(&self) -> &AttendeeId {
        &self.id
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub designation: String,
}

impl ValueObject for RegisterRequest {}

impl RegisterRequest {
    /// Every field is required.
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("full name", &self.full_name)?;
        require_non_blank("email", &self.email)?;
        require_non_blank("designation", &self.designation)
    }
}
