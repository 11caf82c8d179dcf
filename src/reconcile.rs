//! Local copies of store-side lists, kept in step with the store.
//!
//! A [`Reconciler`] owns one list. UI code reads it and asks for changes through
//! [`Reconciler::mutate`]; every confirmed change is followed by a full reload so
//! the local list always ends up equal to what the store reports.

use std::fmt;
use std::hash::Hash;

use crate::errors::ErrorSurface;
use crate::model::{Category, Item};
use crate::remote::{Mutation, RemoteStore, StoreError};

mod rows;

pub use self::rows::{RowMode, Rows};

/// One kind of list the store can return.
pub trait Collection {
    type Entity: Clone + PartialEq + fmt::Debug;
    type Key: Clone + Eq + Hash + fmt::Debug;

    const LABEL: &'static str;

    fn key(entity: &Self::Entity) -> Self::Key;

    fn fetch(&self, store: &dyn RemoteStore) -> Result<Vec<Self::Entity>, StoreError>;

    /// Apply the expected effect of `mutation` ahead of the store's answer.
    /// Anything that cannot be predicted locally is left for the reload.
    fn apply_local(&self, _entities: &mut Vec<Self::Entity>, _mutation: &Mutation) {}
}

pub struct Reconciler<C: Collection> {
    source: C,
    entities: Vec<C::Entity>,
    rows: Rows<C::Key>,
    errors: ErrorSurface,
    loaded: bool,
}

impl<C: Collection> Reconciler<C> {
    pub fn new(source: C, errors: ErrorSurface) -> Self {
        Self {
            source,
            entities: Vec::new(),
            rows: Rows::default(),
            errors,
            loaded: false,
        }
    }

    pub fn entities(&self) -> &[C::Entity] {
        &self.entities
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    /// Swap the list definition (e.g. a new category filter). Takes effect on
    /// the next `load`.
    pub fn set_source(&mut self, source: C) {
        self.source = source;
    }

    pub fn rows(&self) -> &Rows<C::Key> {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Rows<C::Key> {
        &mut self.rows
    }

    /// True once any load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, key: &C::Key) -> Option<&C::Entity> {
        self.entities.iter().find(|e| &C::key(e) == key)
    }

    /// Replace the local list with the store's. On failure the previous list
    /// stays in place and the error joins whatever is already shown; on
    /// success only an error from an earlier batch is cleared.
    pub fn load(&mut self, store: &dyn RemoteStore) -> Result<(), StoreError> {
        match self.source.fetch(store) {
            Ok(fresh) => {
                tracing::debug!(list = C::LABEL, count = fresh.len(), "reloaded");
                self.rows.retain_unchanged(&self.entities, &fresh, C::key);
                self.entities = fresh;
                self.loaded = true;
                self.errors.clear_stale();
                Ok(())
            }
            Err(err) => {
                self.errors.report(&err, true);
                Err(err)
            }
        }
    }

    /// Send `mutation` and reload once the store has confirmed it.
    ///
    /// The local list is spliced first; if the store refuses, the splice is
    /// undone and the refusal replaces any error on the page.
    pub fn mutate(
        &mut self,
        store: &dyn RemoteStore,
        mutation: Mutation,
    ) -> Result<(), StoreError> {
        tracing::debug!(list = C::LABEL, %mutation, "mutate");
        let snapshot = self.entities.clone();
        self.source.apply_local(&mut self.entities, &mutation);

        if let Err(err) = store.apply(&mutation) {
            self.entities = snapshot;
            self.errors.report(&err, false);
            return Err(err);
        }
        self.errors.clear();
        // A failed reload is already on the surface; the mutation itself stands.
        let _ = self.load(store);
        Ok(())
    }
}

/// All categories, in store order.
#[derive(Clone, Debug, Default)]
pub struct Categories;

impl Collection for Categories {
    type Entity = Category;
    type Key = Category;

    const LABEL: &'static str = "categories";

    fn key(entity: &Category) -> Category {
        entity.clone()
    }

    fn fetch(&self, store: &dyn RemoteStore) -> Result<Vec<Category>, StoreError> {
        store.list_categories()
    }

    fn apply_local(&self, entities: &mut Vec<Category>, mutation: &Mutation) {
        match mutation {
            Mutation::AddCategory(name) => entities.push(name.clone()),
            Mutation::RenameCategory { old, new } => {
                for c in entities.iter_mut().filter(|c| *c == old) {
                    *c = new.clone();
                }
            }
            Mutation::DeleteCategory { name, .. } => entities.retain(|c| c != name),
            _ => {}
        }
    }
}

/// Items not yet completed, optionally limited to one category.
#[derive(Clone, Debug, Default)]
pub struct ActiveItems {
    pub filter: Option<Category>,
}

impl Collection for ActiveItems {
    type Entity = Item;
    type Key = crate::model::ItemId;

    const LABEL: &'static str = "active items";

    fn key(entity: &Item) -> Self::Key {
        entity.id
    }

    fn fetch(&self, store: &dyn RemoteStore) -> Result<Vec<Item>, StoreError> {
        store.list_active_items(self.filter.as_ref())
    }

    fn apply_local(&self, entities: &mut Vec<Item>, mutation: &Mutation) {
        match mutation {
            Mutation::DeleteItem(id)
            | Mutation::SetCompleted {
                id,
                unmark: false,
            } => entities.retain(|i| i.id != *id),
            _ => {}
        }
    }
}

/// Completed items, optionally limited to one category.
#[derive(Clone, Debug, Default)]
pub struct CompletedItems {
    pub filter: Option<Category>,
}

impl Collection for CompletedItems {
    type Entity = Item;
    type Key = crate::model::ItemId;

    const LABEL: &'static str = "completed items";

    fn key(entity: &Item) -> Self::Key {
        entity.id
    }

    fn fetch(&self, store: &dyn RemoteStore) -> Result<Vec<Item>, StoreError> {
        store.list_completed_items(self.filter.as_ref())
    }

    fn apply_local(&self, entities: &mut Vec<Item>, mutation: &Mutation) {
        match mutation {
            Mutation::DeleteItem(id) | Mutation::SetCompleted { id, unmark: true } => {
                entities.retain(|i| i.id != *id)
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
