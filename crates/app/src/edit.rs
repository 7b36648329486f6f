//! Form scratch state: create forms and the single in-progress edit.

use std::future::Future;

use eventsite_core::{Draft, Editable};

use crate::collection::RemoteCollection;
use crate::in_flight::InFlight;

/// What a submit did when it did not fail on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing was being edited.
    Idle,
    /// Client-side validation failed; no request was sent.
    Rejected,
    /// The server confirmed the change and the collection holds its response.
    Committed,
}

/// Tracks at most one entity being edited, plus its unsaved fields.
#[derive(Debug)]
pub struct EditSession<T: Editable> {
    target: Option<(T::Id, T::Draft)>,
}

impl<T: Editable> Default for EditSession<T> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<T: Editable> EditSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `entity`. Any edit already in progress is discarded.
    pub fn begin(&mut self, entity: &T) {
        if let Some((previous, _)) = &self.target {
            if previous != entity.id() {
                tracing::debug!(?previous, next = ?entity.id(), "edit target replaced");
            }
        }
        self.target = Some((entity.id().clone(), entity.to_draft()));
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    pub fn editing_id(&self) -> Option<&T::Id> {
        self.target.as_ref().map(|(id, _)| id)
    }

    pub fn is_editing(&self, id: &T::Id) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn draft(&self) -> Option<&T::Draft> {
        self.target.as_ref().map(|(_, draft)| draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut T::Draft> {
        self.target.as_mut().map(|(_, draft)| draft)
    }

    /// Validate, send, and on success fold the response into `collection`.
    ///
    /// On a send error the tracked id and the draft are left as they were so
    /// the user can retry; the collection is not touched.
    pub async fn commit<F, Fut, E>(
        &mut self,
        collection: &mut RemoteCollection<T>,
        send: F,
    ) -> Result<CommitOutcome, E>
    where
        F: FnOnce(T::Id, T::Draft) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some((id, draft)) = &self.target else {
            return Ok(CommitOutcome::Idle);
        };
        if draft.validate().is_err() {
            return Ok(CommitOutcome::Rejected);
        }

        let updated = send(id.clone(), draft.normalized()).await?;
        collection.apply_update(updated);
        self.target = None;
        Ok(CommitOutcome::Committed)
    }
}

/// Scratch state of a create form and its in-flight flag.
#[derive(Debug, Default)]
pub struct CreateForm<D: Draft> {
    draft: D,
    submitting: bool,
}

impl<D: Draft> CreateForm<D> {
    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn reset(&mut self) {
        self.draft = D::default();
    }

    /// Validate, send, and on success insert the created entity and clear the
    /// form. A send error keeps the typed-in fields.
    pub async fn submit<T, F, Fut, E>(
        &mut self,
        collection: &mut RemoteCollection<T>,
        send: F,
    ) -> Result<CommitOutcome, E>
    where
        T: Editable<Draft = D>,
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if self.submitting || self.draft.validate().is_err() {
            return Ok(CommitOutcome::Rejected);
        }

        let created = {
            let _submitting = InFlight::raise(&mut self.submitting);
            send(self.draft.normalized()).await
        };

        collection.apply_create(created?);
        self.reset();
        Ok(CommitOutcome::Committed)
    }
}

/// One form used for both "add" and "update" against an upsert endpoint.
///
/// While an edit is in progress the form shows the edited entity's fields;
/// otherwise it shows the create draft.
#[derive(Debug)]
pub struct EditorForm<T: Editable> {
    create: CreateForm<T::Draft>,
    edit: EditSession<T>,
}

impl<T: Editable> Default for EditorForm<T> {
    fn default() -> Self {
        Self {
            create: CreateForm::default(),
            edit: EditSession::default(),
        }
    }
}

impl<T: Editable> EditorForm<T> {
    pub fn form(&self) -> &T::Draft {
        self.edit.draft().unwrap_or(self.create.draft())
    }

    pub fn form_mut(&mut self) -> &mut T::Draft {
        match self.edit.draft_mut() {
            Some(draft) => draft,
            None => self.create.draft_mut(),
        }
    }

    pub fn begin(&mut self, entity: &T) {
        self.edit.begin(entity);
    }

    /// Leave edit mode and clear the form.
    pub fn cancel(&mut self) {
        self.edit.cancel();
        self.create.reset();
    }

    pub fn editing_id(&self) -> Option<&T::Id> {
        self.edit.editing_id()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_active()
    }

    /// Send the form; `send` gets `Some(id)` for an update, `None` for a create.
    pub async fn submit<F, Fut, E>(
        &mut self,
        collection: &mut RemoteCollection<T>,
        send: F,
    ) -> Result<CommitOutcome, E>
    where
        F: FnOnce(Option<T::Id>, T::Draft) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if self.edit.is_active() {
            self.edit
                .commit(collection, |id, draft| send(Some(id), draft))
                .await
        } else {
            self.create
                .submit(collection, |draft| send(None, draft))
                .await
        }
    }
}
