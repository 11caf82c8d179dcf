//! Typed access to the remote item store.
//!
//! Every component that talks to the store does so through [`RemoteStore`]; the
//! HTTP implementation is [`HttpStore`].

use std::fmt;

use anyhow::{Context, Result};

use crate::model::{Category, Envelope, Item, ItemDraft, ItemId};

mod categories;
mod http_client;
mod items;
mod types;

use self::http_client::unwrap_envelope;
use self::types::*;

/// The single failure channel of the store. An error message in a response
/// envelope, a bad status, a transport failure and an unreadable body all end up
/// here.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl StoreError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self(format!("{:#}", err))
    }
}

/// A store-side change. Reconcilers hand these to [`RemoteStore::apply`] and
/// reload afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    AddCategory(Category),
    RenameCategory {
        old: Category,
        new: Category,
    },
    DeleteCategory {
        name: Category,
        migrate_to: Option<Category>,
    },
    SaveItem {
        draft: ItemDraft,
        ignore_duplicate: bool,
    },
    DeleteItem(ItemId),
    SetCompleted {
        id: ItemId,
        unmark: bool,
    },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::AddCategory(c) => write!(f, "add category {}", c),
            Mutation::RenameCategory { old, new } => write!(f, "rename category {} -> {}", old, new),
            Mutation::DeleteCategory { name, migrate_to } => match migrate_to {
                Some(to) => write!(f, "delete category {} (migrate to {})", name, to),
                None => write!(f, "delete category {}", name),
            },
            Mutation::SaveItem { draft, .. } => match draft.id {
                Some(id) => write!(f, "update item {}", id),
                None => write!(f, "create item {:?}", draft.title),
            },
            Mutation::DeleteItem(id) => write!(f, "delete item {}", id),
            Mutation::SetCompleted { id, unmark: false } => write!(f, "complete item {}", id),
            Mutation::SetCompleted { id, unmark: true } => write!(f, "unmark item {}", id),
        }
    }
}

pub trait RemoteStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    fn add_category(&self, name: &Category) -> Result<(), StoreError>;
    fn rename_category(&self, old: &Category, new: &Category) -> Result<(), StoreError>;
    fn delete_category(
        &self,
        name: &Category,
        migrate_to: Option<&Category>,
    ) -> Result<(), StoreError>;

    fn list_active_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError>;
    fn list_completed_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError>;

    /// `sticky` asks the store to hand back the set it drew last time for this
    /// category (minus anything no longer active) instead of drawing a new one.
    fn random_set(&self, category: &Category, sticky: bool) -> Result<Vec<Item>, StoreError>;

    fn save_item(&self, draft: &ItemDraft, ignore_duplicate: bool) -> Result<(), StoreError>;
    fn delete_item(&self, id: ItemId) -> Result<(), StoreError>;
    fn set_completed(&self, id: ItemId, unmark: bool) -> Result<(), StoreError>;

    fn apply(&self, mutation: &Mutation) -> Result<(), StoreError> {
        match mutation {
            Mutation::AddCategory(name) => self.add_category(name),
            Mutation::RenameCategory { old, new } => self.rename_category(old, new),
            Mutation::DeleteCategory { name, migrate_to } => {
                self.delete_category(name, migrate_to.as_ref())
            }
            Mutation::SaveItem {
                draft,
                ignore_duplicate,
            } => self.save_item(draft, *ignore_duplicate),
            Mutation::DeleteItem(id) => self.delete_item(*id),
            Mutation::SetCompleted { id, unmark } => self.set_completed(*id, *unmark),
        }
    }
}

impl<T: RemoteStore + ?Sized> RemoteStore for &T {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).list_categories()
    }
    fn add_category(&self, name: &Category) -> Result<(), StoreError> {
        (**self).add_category(name)
    }
    fn rename_category(&self, old: &Category, new: &Category) -> Result<(), StoreError> {
        (**self).rename_category(old, new)
    }
    fn delete_category(
        &self,
        name: &Category,
        migrate_to: Option<&Category>,
    ) -> Result<(), StoreError> {
        (**self).delete_category(name, migrate_to)
    }
    fn list_active_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        (**self).list_active_items(category)
    }
    fn list_completed_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        (**self).list_completed_items(category)
    }
    fn random_set(&self, category: &Category, sticky: bool) -> Result<Vec<Item>, StoreError> {
        (**self).random_set(category, sticky)
    }
    fn save_item(&self, draft: &ItemDraft, ignore_duplicate: bool) -> Result<(), StoreError> {
        (**self).save_item(draft, ignore_duplicate)
    }
    fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        (**self).delete_item(id)
    }
    fn set_completed(&self, id: ItemId, unmark: bool) -> Result<(), StoreError> {
        (**self).set_completed(id, unmark)
    }
}

pub struct HttpStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("rando")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[path = "tests/remote/envelope_tests.rs"]
mod tests;
