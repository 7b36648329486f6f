//! The todo list screen.

use eventsite_client::ApiClient;
use eventsite_core::{Todo, TodoDraft, TodoId, TodoPatch};

use crate::collection::{Placement, RemoteCollection};
use crate::edit::{CreateForm, EditSession};
use crate::feedback::{ErrorSlot, Outcome};
use crate::filter::{self, FilterCounts, TodoFilter};
use crate::views::ViewContext;

const LOAD_FAILED: &str = "Failed to load todos. Please try again.";
const CREATE_FAILED: &str = "Failed to create todo. Please try again.";
const UPDATE_FAILED: &str = "Failed to update todo. Please try again.";
const DELETE_FAILED: &str = "Failed to delete todo. Please try again.";

#[derive(Debug)]
pub struct TodoListView {
    api: ApiClient,
    todos: RemoteCollection<Todo>,
    create: CreateForm<TodoDraft>,
    edit: EditSession<Todo>,
    filter: TodoFilter,
    pending_delete: Option<TodoId>,
    error: ErrorSlot,
}

impl TodoListView {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            api: ctx.api.clone(),
            todos: RemoteCollection::new(Placement::Prepend),
            create: CreateForm::default(),
            edit: EditSession::new(),
            filter: TodoFilter::default(),
            pending_delete: None,
            error: ErrorSlot::default(),
        }
    }

    // ---------------------------------------------------------------------
    // Reading
    // ---------------------------------------------------------------------

    pub fn todos(&self) -> &[Todo] {
        self.todos.items()
    }

    /// Todos under the current filter, computed on each call.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> {
        filter::project(self.todos.items(), self.filter)
    }

    pub fn counts(&self) -> FilterCounts {
        filter::counts(self.todos.items())
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    pub fn is_loading(&self) -> bool {
        self.todos.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn dismiss_error(&mut self) {
        self.error.dismiss();
    }

    // ---------------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------------

    pub async fn load(&mut self) -> Outcome {
        self.error.dismiss();
        let api = self.api.clone();
        match self.todos.load_all(|| api.todos()).await {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                self.error.report(LOAD_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Fields of the "new todo" form.
    pub fn new_todo(&self) -> &TodoDraft {
        self.create.draft()
    }

    pub fn new_todo_mut(&mut self) -> &mut TodoDraft {
        self.create.draft_mut()
    }

    pub fn is_creating(&self) -> bool {
        self.create.is_submitting()
    }

    /// Submit the "new todo" form. A blank title sends nothing.
    pub async fn create(&mut self) -> Outcome {
        let api = self.api.clone();
        let result = self
            .create
            .submit(&mut self.todos, |draft| async move {
                api.create_todo(&draft).await
            })
            .await;
        self.error.settle(result, CREATE_FAILED)
    }

    /// Flip `completed`. The todo under edit cannot be toggled.
    pub async fn toggle(&mut self, id: &TodoId) -> Outcome {
        if self.edit.is_editing(id) {
            return Outcome::Rejected;
        }
        let Some(todo) = self.todos.get(id) else {
            return Outcome::Rejected;
        };
        let patch = TodoPatch::toggle(todo);

        match self.api.update_todo(id, &patch).await {
            Ok(updated) => {
                self.todos.apply_update(updated);
                Outcome::Applied
            }
            Err(err) => {
                self.error.report(UPDATE_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    /// Start editing; refused for completed or unknown todos.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        match self.todos.get(id) {
            Some(todo) if todo.is_editable() => {
                self.edit.begin(todo);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    pub fn editing_id(&self) -> Option<&TodoId> {
        self.edit.editing_id()
    }

    pub fn edit_draft(&self) -> Option<&TodoDraft> {
        self.edit.draft()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut TodoDraft> {
        self.edit.draft_mut()
    }

    /// Commit the edit. A todo that is completed or gone by now ends the edit
    /// without sending anything.
    pub async fn save_edit(&mut self) -> Outcome {
        if let Some(id) = self.edit.editing_id() {
            if !self.todos.get(id).is_some_and(Todo::is_editable) {
                tracing::debug!(?id, "edit target no longer editable");
                self.edit.cancel();
                return Outcome::Rejected;
            }
        }

        let api = self.api.clone();
        let result = self
            .edit
            .commit(&mut self.todos, |id, draft| async move {
                api.update_todo(&id, &TodoPatch::from_draft(draft)).await
            })
            .await;
        self.error.settle(result, UPDATE_FAILED)
    }

    /// Ask before deleting; the delete only happens on [`confirm_delete`].
    ///
    /// [`confirm_delete`]: Self::confirm_delete
    pub fn request_delete(&mut self, id: &TodoId) -> bool {
        if !self.todos.contains(id) {
            return false;
        }
        self.pending_delete = Some(id.clone());
        true
    }

    pub fn pending_delete(&self) -> Option<&TodoId> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> Outcome {
        match self.pending_delete.take() {
            Some(id) => self.delete(&id).await,
            None => Outcome::Rejected,
        }
    }

    pub async fn delete(&mut self, id: &TodoId) -> Outcome {
        match self.api.delete_todo(id).await {
            Ok(()) => {
                self.todos.apply_delete(id);
                if self.edit.is_editing(id) {
                    self.edit.cancel();
                }
                Outcome::Applied
            }
            Err(err) => {
                self.error.report(DELETE_FAILED, &err);
                Outcome::Failed
            }
        }
    }
}
