//! Conference sessions and their (read-only) speaker embedding.

use serde::{Deserialize, Serialize};

use crate::entity::{Draft, Editable, Entity, require_non_blank};
use crate::error::DomainResult;
use crate::id::{SessionId, SpeakerId};
use crate::speaker::Speaker;
use crate::value_object::ValueObject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text time slot, e.g. "10:00 AM - 11:00 AM".
    #[serde(default)]
    pub time: String,
    #[serde(default, with = "crate::wire::empty_as_none")]
    pub speaker_id: Option<SpeakerId>,
}

/// A session plus the speaker snapshot the server embeds in `GET /sessions`.
///
/// The embedding is never sent back: upserts go through [`UpsertSession`],
/// which has no speaker field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWithSpeaker {
    #[serde(flatten)]
    pub session: Session,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
}

impl SessionWithSpeaker {
    pub fn bare(session: Session) -> Self {
        Self {
            session,
            speaker: None,
        }
    }

    /// Resolve the embedded snapshot from a local speakers list.
    ///
    /// Clears the snapshot when the referenced speaker is unknown or unset.
    pub fn attach_speaker<'a>(&mut self, speakers: impl IntoIterator<Item = &'a Speaker>) {
        self.speaker = self.session.speaker_id.as_ref().and_then(|wanted| {
            speakers
                .into_iter()
                .find(|speaker| &speaker.id == wanted)
                .cloned()
        });
    }

    pub fn speaker_name(&self) -> Option<&str> {
        self.speaker.as_ref().map(|speaker| speaker.name.as_str())
    }
}

impl From<Session> for SessionWithSpeaker {
    fn from(session: Session) -> Self {
        Self::bare(session)
    }
}

impl Entity for SessionWithSpeaker {
    type Id = SessionId;

    fn id(&self) -> &SessionId {
        &self.session.id
    }
}

impl Editable for SessionWithSpeaker {
    type Draft = SessionDraft;

    fn to_draft(&self) -> SessionDraft {
        SessionDraft {
            title: self.session.title.clone(),
            description: self.session.description.clone(),
            time: self.session.time.clone(),
            speaker_id: self.session.speaker_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub time: String,
    #[serde(default, with = "crate::wire::empty_as_none")]
    pub speaker_id: Option<SpeakerId>,
}

impl ValueObject for SessionDraft {}

impl Draft for SessionDraft {
    fn validate(&self) -> DomainResult<()> {
        require_non_blank("title", &self.title)
    }

    fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Body of `POST /admin/sessions`: creates when `id` is absent, updates otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SessionId>,
    #[serde(flatten)]
    pub draft: SessionDraft,
}

impl UpsertSession {
    pub fn create(draft: SessionDraft) -> Self {
        Self { id: None, draft }
    }

    pub fn update(id: SessionId, draft: SessionDraft) -> Self {
        Self { id: Some(id), draft }
    }
}
