use crate::errors::ClientError;
use crate::schema::{FormRecord, FormValues, category_fields, fresh_values};

use super::*;

impl<S: RemoteStore> App<S> {
    /// Current values of `form`. Edits read the draft kept in their row.
    pub(in crate::tui_shell) fn form_values(&self, form: &Form) -> FormValues {
        let row = match &form.target {
            FormTarget::EditItem(id) => self.page.active().rows().mode(id),
            FormTarget::RenameCategory(c) => self.page.categories().rows().mode(c),
            FormTarget::AddItem | FormTarget::AddCategory => None,
        };
        match row {
            Some(RowMode::Editing { draft }) => draft.clone(),
            _ => form.scratch.clone(),
        }
    }

    pub(in crate::tui_shell) fn set_form_values(&mut self, form: &mut Form, values: FormValues) {
        let row = match &form.target {
            FormTarget::EditItem(id) => self.page.active_mut().rows_mut().draft_mut(id),
            FormTarget::RenameCategory(c) => self.page.categories_mut().rows_mut().draft_mut(c),
            FormTarget::AddItem | FormTarget::AddCategory => None,
        };
        match row {
            Some(draft) => *draft = values,
            None => form.scratch = values,
        }
    }

    /// Leave the row mode a form put its row in.
    pub(in crate::tui_shell) fn finish_form(&mut self, target: &FormTarget) {
        match target {
            FormTarget::EditItem(id) => {
                self.page.active_mut().rows_mut().finish(id);
            }
            FormTarget::RenameCategory(c) => {
                self.page.categories_mut().rows_mut().finish(c);
            }
            FormTarget::AddItem | FormTarget::AddCategory => {}
        }
    }

    pub(in crate::tui_shell) fn open_add_item(&mut self) {
        let fields = self.page.add_item_fields();
        let values = fresh_values(&fields);
        self.modal = Some(Modal::Form(Form::new(FormTarget::AddItem, fields, values)));
    }

    pub(in crate::tui_shell) fn open_edit_item(&mut self) {
        let Some((item, list)) = self.selected_item() else {
            return;
        };
        if list == ListKind::Completed {
            self.note("Completed items cannot be edited; move it back first (u)");
            return;
        }
        let id = item.id;
        // The random pane holds copies; edit the active list's row.
        let Some(item) = self.page.active().find(&id).cloned() else {
            self.note("That item is not in the active list");
            return;
        };
        let fields = self.page.edit_item_fields();
        let values = self.page.edit_values(&item);
        self.page
            .active_mut()
            .rows_mut()
            .begin_edit(id, values.clone());
        self.modal = Some(Modal::Form(Form::new(
            FormTarget::EditItem(id),
            fields,
            values,
        )));
    }

    pub(in crate::tui_shell) fn open_add_category(&mut self) {
        let fields = category_fields();
        let values = fresh_values(&fields);
        self.modal = Some(Modal::Form(Form::new(
            FormTarget::AddCategory,
            fields,
            values,
        )));
    }

    pub(in crate::tui_shell) fn open_rename_category(&mut self) {
        let Some(category) = self.selected_category().cloned() else {
            return;
        };
        let fields = category_fields();
        let values = category.to_values();
        self.page
            .categories_mut()
            .rows_mut()
            .begin_edit(category.clone(), values.clone());
        self.modal = Some(Modal::Form(Form::new(
            FormTarget::RenameCategory(category),
            fields,
            values,
        )));
    }

    /// Save the form. It stays open when the save fails; the error is on the
    /// banner.
    pub(in crate::tui_shell) fn submit_form(&mut self, form: Form) -> Option<Modal> {
        let values = self.form_values(&form);
        let res = match &form.target {
            FormTarget::AddItem => self.page.add_item(&values, form.ignore_duplicate),
            FormTarget::EditItem(id) => self.page.edit_item(*id, &values, form.ignore_duplicate),
            FormTarget::AddCategory => match Category::from_values(&values) {
                Ok(name) => self.page.add_category(name),
                Err(err) => Err(ClientError::from(err)),
            },
            FormTarget::RenameCategory(old) => match Category::from_values(&values) {
                Ok(new) => self.page.rename_category(old.clone(), new),
                Err(err) => Err(ClientError::from(err)),
            },
        };
        match res {
            Ok(()) => {
                self.finish_form(&form.target);
                self.note(format!("{}: done", form.target.title()));
                None
            }
            Err(_) => Some(Modal::Form(form)),
        }
    }
}
