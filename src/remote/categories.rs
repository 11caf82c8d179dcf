//! Category endpoints.

use super::*;

impl HttpStore {
    pub(super) fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        let res = self.get_json::<CategoryList>("/getCategories", &[], "list categories");
        unwrap_envelope(res).map(|l| l.categories)
    }

    pub(super) fn post_add_category(&self, name: &Category) -> Result<(), StoreError> {
        let res = self.post_json(
            "/addCategory",
            &AddCategoryRequest { category: name },
            "add category",
        );
        unwrap_envelope(res).map(|_| ())
    }

    pub(super) fn post_edit_category(
        &self,
        old: &Category,
        new: &Category,
    ) -> Result<(), StoreError> {
        let res = self.post_json(
            "/editCategory",
            &EditCategoryRequest {
                old_category: old,
                new_category: new,
            },
            "rename category",
        );
        unwrap_envelope(res).map(|_| ())
    }

    pub(super) fn post_remove_category(
        &self,
        name: &Category,
        migrate_to: Option<&Category>,
    ) -> Result<(), StoreError> {
        let res = self.post_json(
            "/removeCategory",
            &RemoveCategoryRequest {
                category: name,
                migrate_to,
            },
            "delete category",
        );
        unwrap_envelope(res).map(|_| ())
    }
}
