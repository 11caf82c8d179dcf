use crate::lifecycle::MigrationChoice;

use super::*;

impl<S: RemoteStore> App<S> {
    pub(in crate::tui_shell) fn open_category_picker(&mut self) {
        let options = self.page.category_options();
        let current = self.page.selected().map(|c| c.as_str()).unwrap_or("");
        let selected = options.iter().position(|o| o.value == current).unwrap_or(0);
        self.modal = Some(Modal::PickCategory { options, selected });
    }

    /// Scope the page to the category named `value`; empty clears the scope.
    pub(in crate::tui_shell) fn select_category(&mut self, value: &str) {
        self.page.select_category(Some(Category::new(value)));
        self.random_sel = 0;
        self.item_sel = 0;
    }

    pub(in crate::tui_shell) fn new_random_set(&mut self) {
        if self.page.selected().is_none() {
            self.note("Select a category first (c)");
            return;
        }
        if self.page.new_random_set().is_ok() {
            self.random_sel = 0;
        }
    }

    pub(in crate::tui_shell) fn toggle_list(&mut self) {
        self.list = match self.list {
            ListKind::Active => ListKind::Completed,
            ListKind::Completed => ListKind::Active,
        };
        self.focus = Focus::Items;
        self.item_sel = 0;
    }

    pub(in crate::tui_shell) fn open_confirm(&mut self, action: ConfirmAction) {
        let Some((item, list)) = self.selected_item() else {
            return;
        };
        let fits = match action {
            ConfirmAction::Delete => true,
            ConfirmAction::Complete => list == ListKind::Active,
            ConfirmAction::Uncomplete => list == ListKind::Completed,
        };
        if !fits {
            return;
        }
        let confirm = Confirm {
            id: item.id,
            list,
            action,
            title: item.title.clone(),
        };
        let rows = self.item_rows_mut(list);
        match action {
            ConfirmAction::Delete => rows.begin_delete(confirm.id),
            ConfirmAction::Complete | ConfirmAction::Uncomplete => rows.begin_mark(confirm.id),
        }
        self.modal = Some(Modal::Confirm(confirm));
    }

    pub(in crate::tui_shell) fn confirm(&mut self, confirm: &Confirm) {
        let res = match confirm.action {
            ConfirmAction::Delete => self.page.delete_item(confirm.id),
            ConfirmAction::Complete => self.page.mark_completed(confirm.id),
            ConfirmAction::Uncomplete => self.page.unmark_completed(confirm.id),
        };
        self.item_rows_mut(confirm.list).finish(&confirm.id);
        if res.is_ok() {
            self.note(match confirm.action {
                ConfirmAction::Delete => format!("Deleted {}", confirm.title),
                ConfirmAction::Complete => format!("Completed {}", confirm.title),
                ConfirmAction::Uncomplete => format!("{} is active again", confirm.title),
            });
        }
    }

    pub(in crate::tui_shell) fn open_delete_category(&mut self) {
        let Some(category) = self.selected_category().cloned() else {
            return;
        };
        let options = self.page.migration_options(&category);
        self.page
            .categories_mut()
            .rows_mut()
            .begin_delete(category.clone());
        self.modal = Some(Modal::Migrate {
            category,
            options,
            selected: 0,
        });
    }

    /// Delete `category` with the choice recorded in its row. The chooser
    /// stays open if the store refuses.
    pub(in crate::tui_shell) fn delete_category(
        &mut self,
        category: Category,
        options: Vec<MigrationChoice>,
        selected: usize,
    ) -> Option<Modal> {
        let choice = match self.page.categories().rows().mode(&category) {
            Some(RowMode::Deleting { choice }) => MigrationChoice::from_value(choice),
            _ => MigrationChoice::DoNotMigrate,
        };
        match self.page.delete_category(category.clone(), choice) {
            Ok(()) => {
                self.page.categories_mut().rows_mut().finish(&category);
                self.note(format!("Deleted category {}", category));
                None
            }
            Err(_) => Some(Modal::Migrate {
                category,
                options,
                selected,
            }),
        }
    }
}
