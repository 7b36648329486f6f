//! Todo list entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Draft, Editable, Entity, require_non_blank};
use crate::error::DomainResult;
use crate::id::TodoId;
use crate::value_object::ValueObject;

/// A todo item as returned by `GET /todos` (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Completed todos are toggleable and deletable, but not editable.
    pub fn is_editable(&self) -> bool {
        !self.completed
    }
}

impl Entity for Todo {
    type Id = TodoId;

    fn id(&self) -> &TodoId {
        &self.id
    }
}

impl Editable for Todo {
    type Draft = TodoDraft;

    fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Scratch state of the create and edit forms; also the `POST /todos` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl ValueObject for TodoDraft {}

impl Draft for TodoDraft {
    fn validate(&self) -> DomainResult<()> {
        require_non_blank("title", &self.title)
    }

    fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Partial update body for `PATCH /todos/{id}`; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Flip the completion flag and nothing else.
    pub fn toggle(todo: &Todo) -> Self {
        Self {
            completed: Some(!todo.completed),
            ..Self::default()
        }
    }

    /// Replace the editable text fields with an (already normalized) draft.
    pub fn from_draft(draft: TodoDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            completed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(completed: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id: TodoId::new("t1"),
            title: "Buy milk".into(),
            description: "2 litres".into(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn draft_normalization_trims_both_fields() {
        let draft = TodoDraft::new("  Buy milk ", "\tsoon  ");
        assert_eq!(draft.normalized(), TodoDraft::new("Buy milk", "soon"));
    }

    #[test]
    fn blank_title_fails_validation() {
        assert!(TodoDraft::new("   ", "desc").validate().is_err());
        assert!(TodoDraft::new("a", "").validate().is_ok());
    }

    #[test]
    fn toggle_patch_only_carries_completed() {
        let patch = TodoPatch::toggle(&todo(false));
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn completed_todos_are_not_editable() {
        assert!(todo(false).is_editable());
        assert!(!todo(true).is_editable());
    }

    #[test]
    fn decodes_backend_shape() {
        let json = r#"{
            "id": "abc",
            "title": "Write talk",
            "description": "",
            "completed": false,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00.123456789Z"
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id.as_str(), "abc");
        assert_eq!(todo.to_draft(), TodoDraft::new("Write talk", ""));
    }
}
