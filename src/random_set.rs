//! The random set shown for the selected category.

use crate::errors::ErrorSurface;
use crate::model::{Category, Item};
use crate::remote::{RemoteStore, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Populated,
}

/// A sticky random subset of the active items of one category.
///
/// Selecting a category and refreshing after a change both ask the store for
/// its last draw (`sticky`), so the set only reshuffles when the user asks for
/// a new one.
pub struct RandomSession {
    category: Option<Category>,
    items: Vec<Item>,
    errors: ErrorSurface,
}

impl RandomSession {
    pub fn new(errors: ErrorSurface) -> Self {
        Self {
            category: None,
            items: Vec::new(),
            errors,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.items.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Populated
        }
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Switch to `category`. No category means an empty session and no request.
    pub fn select(
        &mut self,
        store: &dyn RemoteStore,
        category: Option<Category>,
    ) -> Result<(), StoreError> {
        let changed = self.category != category;
        self.category = category;
        let Some(category) = self.category.clone() else {
            self.items.clear();
            return Ok(());
        };
        if changed {
            // Nothing drawn for the new category is known yet.
            self.items.clear();
        }
        self.fetch(store, &category, true, true)
    }

    /// Throw away the current draw and ask for a new one. A failure here is the
    /// user's latest action, so it replaces any error already shown.
    pub fn regenerate(&mut self, store: &dyn RemoteStore) -> Result<(), StoreError> {
        match self.category.clone() {
            Some(category) => self.fetch(store, &category, false, false),
            None => Ok(()),
        }
    }

    /// Re-read the current draw after a change that may have removed members.
    pub fn refresh(&mut self, store: &dyn RemoteStore) -> Result<(), StoreError> {
        match self.category.clone() {
            Some(category) => self.fetch(store, &category, true, true),
            None => Ok(()),
        }
    }

    fn fetch(
        &mut self,
        store: &dyn RemoteStore,
        category: &Category,
        sticky: bool,
        keep_existing: bool,
    ) -> Result<(), StoreError> {
        match store.random_set(category, sticky) {
            Ok(items) => {
                tracing::debug!(%category, sticky, count = items.len(), "random set");
                self.items = items;
                if keep_existing {
                    self.errors.clear_stale();
                } else {
                    self.errors.clear();
                }
                Ok(())
            }
            Err(err) => {
                self.errors.report(&err, keep_existing);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/random_set_tests.rs"]
mod tests;
