use crate::lifecycle::MigrationChoice;
use crate::model::{Category, ItemId};
use crate::schema::{FieldDescriptor, FieldKind, FormValues, SelectOption};

use super::{Input, ListKind};

mod draw;
mod keymap;

pub(super) use self::draw::draw_modal;
pub(super) use self::keymap::handle_modal_key;

/// What a form saves into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum FormTarget {
    AddItem,
    EditItem(ItemId),
    AddCategory,
    RenameCategory(Category),
}

impl FormTarget {
    pub(super) fn title(&self) -> String {
        match self {
            FormTarget::AddItem => "Add item".to_string(),
            FormTarget::EditItem(id) => format!("Edit item {}", id),
            FormTarget::AddCategory => "Add category".to_string(),
            FormTarget::RenameCategory(c) => format!("Rename {}", c),
        }
    }
}

pub(super) struct Form {
    pub(super) target: FormTarget,
    pub(super) fields: Vec<FieldDescriptor>,
    /// Values of a form with no row behind it.
    pub(super) scratch: FormValues,
    pub(super) focus: usize,
    pub(super) input: Input,
    pub(super) ignore_duplicate: bool,
}

impl Form {
    pub(super) fn new(target: FormTarget, fields: Vec<FieldDescriptor>, values: FormValues) -> Self {
        let mut form = Self {
            target,
            fields,
            scratch: values,
            focus: 0,
            input: Input::default(),
            ignore_duplicate: false,
        };
        let first = form.scratch.clone();
        form.focus_field(0, &first);
        form
    }

    pub(super) fn focused(&self) -> &FieldDescriptor {
        &self.fields[self.focus]
    }

    pub(super) fn focused_is_text(&self) -> bool {
        matches!(self.focused().kind, FieldKind::Text)
    }

    /// Move focus to field `idx` and load its value into the line editor.
    pub(super) fn focus_field(&mut self, idx: usize, values: &FormValues) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = idx % self.fields.len();
        let key = self.fields[self.focus].key.clone();
        self.input.set(values.get(&key).unwrap_or_default());
    }

    pub(super) fn step_focus(&mut self, step: isize, values: &FormValues) {
        let n = self.fields.len() as isize;
        if n == 0 {
            return;
        }
        let next = (self.focus as isize + step).rem_euclid(n) as usize;
        self.focus_field(next, values);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ConfirmAction {
    Delete,
    Complete,
    Uncomplete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Confirm {
    pub(super) id: ItemId,
    pub(super) list: ListKind,
    pub(super) action: ConfirmAction,
    pub(super) title: String,
}

impl Confirm {
    pub(super) fn question(&self) -> String {
        match self.action {
            ConfirmAction::Delete => format!("Delete \"{}\"?", self.title),
            ConfirmAction::Complete => format!("Mark \"{}\" completed?", self.title),
            ConfirmAction::Uncomplete => format!("Move \"{}\" back to active?", self.title),
        }
    }
}

pub(super) enum Modal {
    Form(Form),
    Confirm(Confirm),
    Migrate {
        category: Category,
        options: Vec<MigrationChoice>,
        selected: usize,
    },
    PickCategory {
        options: Vec<SelectOption>,
        selected: usize,
    },
}
