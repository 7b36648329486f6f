//! Conference speakers.

use serde::{Deserialize, Serialize};

use crate::entity::{Draft, Editable, Entity, require_non_blank};
use crate::error::DomainResult;
use crate::id::SpeakerId;
use crate::value_object::ValueObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    /// URL of the speaker photo, or empty.
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
}

impl Entity for Speaker {
    type Id = SpeakerId;

    fn id(&self) -> &SpeakerId {
        &self.id
    }
}

impl Editable for Speaker {
    type Draft = SpeakerDraft;

    fn to_draft(&self) -> SpeakerDraft {
        SpeakerDraft {
            name: self.name.clone(),
            bio: self.bio.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerDraft {
    pub name: String,
    pub bio: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

impl ValueObject for SpeakerDraft {}

impl Draft for SpeakerDraft {
    fn validate(&self) -> DomainResult<()> {
        require_non_blank("name", &self.name)
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            bio: self.bio.clone(),
            photo_url: self.photo_url.trim().to_string(),
        }
    }
}

/// Body of `POST /admin/speakers`: creates when `id` is absent, updates otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertSpeaker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SpeakerId>,
    #[serde(flatten)]
    pub draft: SpeakerDraft,
}

impl UpsertSpeaker {
    pub fn create(draft: SpeakerDraft) -> Self {
        Self { id: None, draft }
    }

    pub fn update(id: SpeakerId, draft: SpeakerDraft) -> Self {
        Self { id: Some(id), draft }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_omits_id() {
        let body = serde_json::to_value(UpsertSpeaker::create(SpeakerDraft {
            name: "Ada".into(),
            bio: "".into(),
            photo_url: "https://example.org/ada.png".into(),
        }))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Ada",
                "bio": "",
                "photoURL": "https://example.org/ada.png"
            })
        );
    }

    #[test]
    fn update_body_carries_id() {
        let body =
            serde_json::to_value(UpsertSpeaker::update(SpeakerId::new("s1"), SpeakerDraft::default()))
                .unwrap();
        assert_eq!(body["id"], "s1");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let speaker: Speaker = serde_json::from_str(r#"{"id":"s1","name":"Grace"}"#).unwrap();
        assert_eq!(speaker.bio, "");
        assert_eq!(speaker.photo_url, "");
    }
}
