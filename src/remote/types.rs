//! Wire payloads for store requests and responses.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Category, Item, ItemDraft, ItemId};

/// The store sends `null` payloads next to an error; treat them as empty.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct CategoryList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) categories: Vec<Category>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct ItemList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) items: Vec<Item>,
}

/// Payload of operations that only report success or an error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Ack {}

#[derive(Debug, Serialize)]
pub(super) struct AddCategoryRequest<'a> {
    pub(super) category: &'a Category,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EditCategoryRequest<'a> {
    pub(super) old_category: &'a Category,
    pub(super) new_category: &'a Category,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RemoveCategoryRequest<'a> {
    pub(super) category: &'a Category,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) migrate_to: Option<&'a Category>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SaveItemRequest<'a> {
    pub(super) item: &'a ItemDraft,
    pub(super) ignore_duplicate: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct RemoveItemRequest {
    pub(super) id: ItemId,
}

#[derive(Debug, Serialize)]
pub(super) struct MarkCompletedRequest {
    pub(super) id: ItemId,
    pub(super) unmark: bool,
}
