//! Item endpoints, the random set, and the store's admin endpoints.

use super::*;

fn category_query(category: Option<&Category>) -> Vec<(&'static str, String)> {
    category
        .map(|c| vec![("category", c.to_string())])
        .unwrap_or_default()
}

impl HttpStore {
    pub(super) fn fetch_items(
        &self,
        path: &str,
        category: Option<&Category>,
        label: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let res = self.get_json::<ItemList>(path, &category_query(category), label);
        unwrap_envelope(res).map(|l| l.items)
    }

    pub(super) fn fetch_random_set(
        &self,
        category: &Category,
        sticky: bool,
    ) -> Result<Vec<Item>, StoreError> {
        let query = [
            ("category", category.to_string()),
            ("useLast", sticky.to_string()),
        ];
        let res = self.get_json::<ItemList>("/getRandomSet", &query, "random set");
        unwrap_envelope(res).map(|l| l.items)
    }

    pub(super) fn post_save_item(
        &self,
        draft: &ItemDraft,
        ignore_duplicate: bool,
    ) -> Result<(), StoreError> {
        let res = self.post_json(
            "/saveItem",
            &SaveItemRequest {
                item: draft,
                ignore_duplicate,
            },
            "save item",
        );
        unwrap_envelope(res).map(|_| ())
    }

    pub(super) fn post_remove_item(&self, id: ItemId) -> Result<(), StoreError> {
        let res = self.post_json("/removeItem", &RemoveItemRequest { id }, "delete item");
        unwrap_envelope(res).map(|_| ())
    }

    pub(super) fn post_mark_completed(&self, id: ItemId, unmark: bool) -> Result<(), StoreError> {
        let label = if unmark { "unmark item" } else { "complete item" };
        let res = self.post_json("/markCompleted", &MarkCompletedRequest { id, unmark }, label);
        unwrap_envelope(res).map(|_| ())
    }

    /// Liveness message from the store.
    pub fn health(&self) -> Result<String> {
        self.get_text("/health", "health")
    }

    /// Ask the store to re-read its save file.
    pub fn reload(&self) -> Result<String> {
        self.get_text("/reload", "reload")
    }
}

impl RemoteStore for HttpStore {
    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.fetch_categories()
    }

    fn add_category(&self, name: &Category) -> Result<(), StoreError> {
        self.post_add_category(name)
    }

    fn rename_category(&self, old: &Category, new: &Category) -> Result<(), StoreError> {
        self.post_edit_category(old, new)
    }

    fn delete_category(
        &self,
        name: &Category,
        migrate_to: Option<&Category>,
    ) -> Result<(), StoreError> {
        self.post_remove_category(name, migrate_to)
    }

    fn list_active_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        self.fetch_items("/getFullList", category, "list active items")
    }

    fn list_completed_items(&self, category: Option<&Category>) -> Result<Vec<Item>, StoreError> {
        self.fetch_items("/getCompletedList", category, "list completed items")
    }

    fn random_set(&self, category: &Category, sticky: bool) -> Result<Vec<Item>, StoreError> {
        self.fetch_random_set(category, sticky)
    }

    fn save_item(&self, draft: &ItemDraft, ignore_duplicate: bool) -> Result<(), StoreError> {
        self.post_save_item(draft, ignore_duplicate)
    }

    fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        self.post_remove_item(id)
    }

    fn set_completed(&self, id: ItemId, unmark: bool) -> Result<(), StoreError> {
        self.post_mark_completed(id, unmark)
    }
}
