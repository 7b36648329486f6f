//! Todo filter tabs.

use eventsite_core::Todo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Active, TodoFilter::Completed];

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !todo.completed,
            TodoFilter::Completed => todo.completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Active => "Active",
            TodoFilter::Completed => "Completed",
        }
    }

    /// Placeholder shown when the projection is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            TodoFilter::All => "No todos yet. Add one above!",
            TodoFilter::Active => "No active todos.",
            TodoFilter::Completed => "No completed todos.",
        }
    }
}

/// The todos visible under `filter`, in collection order.
///
/// Borrows `items`; nothing is cached, so each call reflects the current list.
pub fn project(items: &[Todo], filter: TodoFilter) -> impl Iterator<Item = &Todo> + '_ {
    items.iter().filter(move |todo| filter.matches(todo))
}

/// Numbers shown on the filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl FilterCounts {
    pub fn get(&self, filter: TodoFilter) -> usize {
        match filter {
            TodoFilter::All => self.all,
            TodoFilter::Active => self.active,
            TodoFilter::Completed => self.completed,
        }
    }
}

pub fn counts(items: &[Todo]) -> FilterCounts {
    let completed = items.iter().filter(|todo| todo.completed).count();
    FilterCounts {
        all: items.len(),
        active: items.len() - completed,
        completed,
    }
}
