//! Everything one page of the client shows, wired together.
//!
//! The page owns the store handle, the shared error surface, the category and
//! item lists and the random set, and decides which lists have to be reloaded
//! after each change.

use crate::errors::{ClientError, ErrorSurface};
use crate::lifecycle::{self, MigrationChoice};
use crate::model::{Category, Item, ItemDraft, ItemId};
use crate::random_set::RandomSession;
use crate::reconcile::{ActiveItems, Categories, CompletedItems, Reconciler};
use crate::remote::{Mutation, RemoteStore};
use crate::schema::{
    self, FieldDescriptor, FormRecord, FormValues, SelectOption, item_fields, seed_values,
};

pub const SELECT_CATEGORY_LABEL: &str = "Select Category";

pub struct Page<S> {
    store: S,
    errors: ErrorSurface,
    categories: Reconciler<Categories>,
    active: Reconciler<ActiveItems>,
    completed: Reconciler<CompletedItems>,
    random: RandomSession,
    selected: Option<Category>,
}

impl<S: RemoteStore> Page<S> {
    pub fn new(store: S) -> Self {
        let errors = ErrorSurface::new();
        Self {
            store,
            categories: Reconciler::new(Categories, errors.clone()),
            active: Reconciler::new(ActiveItems::default(), errors.clone()),
            completed: Reconciler::new(CompletedItems::default(), errors.clone()),
            random: RandomSession::new(errors.clone()),
            errors,
            selected: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn errors(&self) -> &ErrorSurface {
        &self.errors
    }

    pub fn selected(&self) -> Option<&Category> {
        self.selected.as_ref()
    }

    pub fn categories(&self) -> &Reconciler<Categories> {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut Reconciler<Categories> {
        &mut self.categories
    }

    pub fn active(&self) -> &Reconciler<ActiveItems> {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut Reconciler<ActiveItems> {
        &mut self.active
    }

    pub fn completed(&self) -> &Reconciler<CompletedItems> {
        &self.completed
    }

    pub fn completed_mut(&mut self) -> &mut Reconciler<CompletedItems> {
        &mut self.completed
    }

    pub fn random(&self) -> &RandomSession {
        &self.random
    }

    /// Initial load of every list.
    pub fn open(&mut self) {
        self.errors.next_batch();
        let _ = self.categories.load(&self.store);
        self.reload_items();
        let _ = self.random.select(&self.store, self.selected.clone());
    }

    /// Reload everything the page shows, keeping the random draw.
    pub fn refresh_all(&mut self) {
        self.errors.next_batch();
        let _ = self.categories.load(&self.store);
        self.reload_items();
        let _ = self.random.refresh(&self.store);
    }

    fn reload_items(&mut self) {
        let _ = self.active.load(&self.store);
        let _ = self.completed.load(&self.store);
    }

    /// Scope the page to `category` (or to everything with `None`).
    pub fn select_category(&mut self, category: Option<Category>) {
        self.errors.next_batch();
        self.scope_to(category);
    }

    fn scope_to(&mut self, category: Option<Category>) {
        let category = category.filter(|c| !c.is_blank());
        tracing::debug!(category = ?category, "select category");
        self.selected = category.clone();
        self.active.set_source(ActiveItems {
            filter: category.clone(),
        });
        self.completed.set_source(CompletedItems {
            filter: category.clone(),
        });
        self.active.rows_mut().clear();
        self.completed.rows_mut().clear();
        self.reload_items();
        let _ = self.random.select(&self.store, category);
    }

    /// Choices for the category selector; the first entry selects nothing.
    pub fn category_options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::new("", SELECT_CATEGORY_LABEL))
            .chain(
                self.categories
                    .entities()
                    .iter()
                    .map(|c| SelectOption::new(c.as_str(), c.as_str())),
            )
            .collect()
    }

    pub fn migration_options(&self, category: &Category) -> Vec<MigrationChoice> {
        lifecycle::migration_options(self.categories.entities(), category)
    }

    /// Reject input the store would refuse anyway, without a round-trip.
    fn precondition<T>(&self, check: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &check {
            self.errors.report(err, false);
        }
        check
    }

    pub fn add_category(&mut self, name: Category) -> Result<(), ClientError> {
        self.errors.next_batch();
        let name = Category::new(name.as_str().trim());
        self.precondition(lifecycle::check_add(self.categories.entities(), &name))?;
        self.categories.mutate(&self.store, Mutation::AddCategory(name))?;
        Ok(())
    }

    /// Rename a category. Items are not rewritten locally; the item lists are
    /// reloaded so they show whatever the store did to them.
    pub fn rename_category(&mut self, old: Category, new: Category) -> Result<(), ClientError> {
        self.errors.next_batch();
        let new = Category::new(new.as_str().trim());
        let old = self.precondition(lifecycle::check_rename(
            self.categories.entities(),
            &old,
            &new,
        ))?;
        self.categories.mutate(
            &self.store,
            Mutation::RenameCategory {
                old: old.clone(),
                new: new.clone(),
            },
        )?;
        let next = lifecycle::selection_after_rename(self.selected.as_ref(), &old, &new);
        self.after_category_change(next);
        Ok(())
    }

    pub fn delete_category(
        &mut self,
        name: Category,
        choice: MigrationChoice,
    ) -> Result<(), ClientError> {
        self.errors.next_batch();
        let (name, migrate_to) = self.precondition(lifecycle::check_delete(
            self.categories.entities(),
            &name,
            choice.target(),
        ))?;
        self.categories.mutate(
            &self.store,
            Mutation::DeleteCategory {
                name: name.clone(),
                migrate_to: migrate_to.clone(),
            },
        )?;
        let next =
            lifecycle::selection_after_delete(self.selected.as_ref(), &name, migrate_to.as_ref());
        self.after_category_change(next);
        Ok(())
    }

    fn after_category_change(&mut self, next: Option<Category>) {
        if next != self.selected {
            self.scope_to(next);
        } else {
            self.reload_items();
            let _ = self.random.refresh(&self.store);
        }
    }

    /// Fields of the add-item form. In a category-scoped view the category is
    /// fixed to the scope.
    pub fn add_item_fields(&self) -> Vec<FieldDescriptor> {
        item_fields(self.categories.entities(), self.selected.as_ref(), true)
    }

    pub fn edit_item_fields(&self) -> Vec<FieldDescriptor> {
        item_fields(self.categories.entities(), self.selected.as_ref(), false)
    }

    /// Starting values of the edit form for `item`.
    pub fn edit_values(&self, item: &Item) -> FormValues {
        seed_values(&self.edit_item_fields(), &item.draft().to_values())
    }

    fn draft_from(
        &self,
        fields: &[FieldDescriptor],
        values: &FormValues,
        id: Option<ItemId>,
    ) -> Result<ItemDraft, ClientError> {
        if self.categories.entities().is_empty() {
            return Err(ClientError::NoCategories);
        }
        let mut draft = ItemDraft::from_values(&schema::submit(fields, values))?;
        if draft.title.is_empty() {
            return Err(ClientError::BlankTitle);
        }
        draft.id = id;
        Ok(draft)
    }

    pub fn add_item(
        &mut self,
        values: &FormValues,
        ignore_duplicate: bool,
    ) -> Result<(), ClientError> {
        self.errors.next_batch();
        let draft = self.precondition(self.draft_from(&self.add_item_fields(), values, None))?;
        self.active.mutate(
            &self.store,
            Mutation::SaveItem {
                draft,
                ignore_duplicate,
            },
        )?;
        let _ = self.random.refresh(&self.store);
        Ok(())
    }

    pub fn edit_item(
        &mut self,
        id: ItemId,
        values: &FormValues,
        ignore_duplicate: bool,
    ) -> Result<(), ClientError> {
        self.errors.next_batch();
        let known = self.active.find(&id).is_some();
        let draft = if known {
            self.draft_from(&self.edit_item_fields(), values, Some(id))
        } else {
            Err(ClientError::UnknownItem(id))
        };
        let draft = self.precondition(draft)?;
        self.active.mutate(
            &self.store,
            Mutation::SaveItem {
                draft,
                ignore_duplicate,
            },
        )?;
        let _ = self.random.refresh(&self.store);
        Ok(())
    }

    /// Delete an item from whichever list holds it.
    pub fn delete_item(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.errors.next_batch();
        let mutation = Mutation::DeleteItem(id);
        if self.completed.find(&id).is_some() {
            self.completed.mutate(&self.store, mutation)?;
            let _ = self.active.load(&self.store);
        } else {
            self.active.mutate(&self.store, mutation)?;
            let _ = self.completed.load(&self.store);
        }
        let _ = self.random.refresh(&self.store);
        Ok(())
    }

    /// Move an item to the completed list. The random set drops it on its
    /// refresh, not by local removal.
    pub fn mark_completed(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.errors.next_batch();
        self.active
            .mutate(&self.store, Mutation::SetCompleted { id, unmark: false })?;
        let _ = self.completed.load(&self.store);
        let _ = self.random.refresh(&self.store);
        Ok(())
    }

    pub fn unmark_completed(&mut self, id: ItemId) -> Result<(), ClientError> {
        self.errors.next_batch();
        self.completed
            .mutate(&self.store, Mutation::SetCompleted { id, unmark: true })?;
        let _ = self.active.load(&self.store);
        let _ = self.random.refresh(&self.store);
        Ok(())
    }

    pub fn new_random_set(&mut self) -> Result<(), ClientError> {
        self.errors.next_batch();
        self.random.regenerate(&self.store)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
