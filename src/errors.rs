//! The page's single error slot.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::{Category, ItemId};
use crate::remote::StoreError;
use crate::schema::SchemaError;

/// Errors the client raises itself, plus whatever the store reported.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Form(#[from] SchemaError),

    #[error("category name is required")]
    BlankCategory,

    #[error("category already exists: {0}")]
    DuplicateCategory(Category),

    #[error("could not find category: {0}")]
    UnknownCategory(Category),

    #[error("category is unchanged: {0}")]
    UnchangedCategory(Category),

    #[error("cannot delete the only category: {0}")]
    LastCategory(Category),

    #[error("cannot migrate {0} into itself")]
    MigrateToSelf(Category),

    #[error("title is required")]
    BlankTitle,

    #[error("could not find item: {0}")]
    UnknownItem(ItemId),

    #[error("no categories exist yet; add one first")]
    NoCategories,
}

#[derive(Debug, Default)]
struct Slot {
    message: Option<String>,
    /// The message was reported during the current batch.
    fresh: bool,
}

/// One optional error per page, shared by every reconciler on it.
///
/// Clones share the slot. Work is grouped into batches: the page starts a new
/// batch for each user action, and everything that action triggers (the
/// mutation and the reloads behind it) belongs to that batch. Within a batch
/// the first reload error wins; a success only clears an error left over from
/// an earlier batch, so a failed list is not hidden by a sibling that loaded
/// fine a moment later.
#[derive(Clone, Debug, Default)]
pub struct ErrorSurface {
    slot: Rc<RefCell<Slot>>,
}

impl ErrorSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// With `keep_existing` the first error of a batch wins; otherwise the new
    /// error replaces whatever is shown.
    pub fn report(&self, error: impl ToString, keep_existing: bool) {
        let msg = error.to_string();
        let mut slot = self.slot.borrow_mut();
        if keep_existing && slot.message.is_some() {
            tracing::warn!(kept = slot.message.as_deref(), "{}", msg);
            // The kept text now also stands for this batch's failure.
            slot.fresh = true;
            return;
        }
        tracing::warn!("{}", msg);
        slot.message = Some(msg);
        slot.fresh = true;
    }

    pub fn clear(&self) {
        let mut slot = self.slot.borrow_mut();
        slot.message = None;
        slot.fresh = false;
    }

    /// Clear an error that an earlier batch reported. Used by reloads, which
    /// must not hide a failure from their own batch.
    pub fn clear_stale(&self) {
        let stale = !self.slot.borrow().fresh;
        if stale {
            self.clear();
        }
    }

    /// Start a new batch: whatever is shown now becomes stale.
    pub fn next_batch(&self) {
        self.slot.borrow_mut().fresh = false;
    }

    pub fn current(&self) -> Option<String> {
        self.slot.borrow().message.clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().message.is_some()
    }
}

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
