//! In-memory mirror of a server-owned collection.
//!
//! Only confirmed state ever lands here: every `apply_*` takes the server's
//! authoritative response to a call that already succeeded.

use std::collections::HashSet;
use std::future::Future;

use eventsite_core::Entity;

use crate::in_flight::InFlight;

/// Where a freshly created entity goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Newest first (todos).
    Prepend,
    /// Server order (speakers, sessions).
    Append,
}

#[derive(Debug, Clone)]
pub struct RemoteCollection<T: Entity> {
    items: Vec<T>,
    placement: Placement,
    loading: bool,
}

impl<T: Entity> RemoteCollection<T> {
    pub fn new(placement: Placement) -> Self {
        Self {
            items: Vec::new(),
            placement,
            loading: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Fetch the whole collection and replace the local copy wholesale.
    ///
    /// On error the previous items are kept and the error is returned to the
    /// caller to surface.
    pub async fn load_all<F, Fut, E>(&mut self, fetch: F) -> Result<(), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let fetched = {
            let _loading = InFlight::raise(&mut self.loading);
            fetch().await
        };

        self.replace_all(fetched?);
        Ok(())
    }

    /// Replace the local copy; later duplicates of an id are dropped.
    pub fn replace_all(&mut self, items: Vec<T>) {
        let incoming = items.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();

        if self.items.len() != incoming {
            tracing::warn!(
                dropped = incoming - self.items.len(),
                "server list contained duplicate ids"
            );
        }
    }

    /// Insert a confirmed create; an id already present is replaced in place.
    pub fn apply_create(&mut self, entity: T) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == entity.id()) {
            *slot = entity;
            return;
        }

        match self.placement {
            Placement::Prepend => self.items.insert(0, entity),
            Placement::Append => self.items.push(entity),
        }
    }

    /// Swap in a confirmed update. Returns `false` when the id is unknown
    /// (the list was refreshed underneath us); nothing changes then.
    pub fn apply_update(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => {
                tracing::debug!(id = ?entity.id(), "update for unknown id ignored");
                false
            }
        }
    }

    /// Remove a confirmed delete. Idempotent.
    pub fn apply_delete(&mut self, id: &T::Id) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}
