use anyhow::Result;

use crate::model::{Category, Item, ItemId};
use crate::page::Page;
use crate::reconcile::{RowMode, Rows};
use crate::remote::{HttpStore, RemoteStore};

use super::{Confirm, ConfirmAction, Form, FormTarget, Modal};

mod actions;
mod event_loop;
mod forms;
mod render;
mod runtime;

#[cfg(test)]
pub(in crate::tui_shell) use self::event_loop::handle_key;
#[cfg(test)]
pub(in crate::tui_shell) use self::render::draw;

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    let store = HttpStore::new(&opts.base_url)?;
    runtime::run(App::new(Page::new(store), opts.base_url))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Tab {
    Rando,
    Categories,
}

/// Which pane of the Rando tab the cursor is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    Random,
    Items,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum ListKind {
    Active,
    Completed,
}

pub(in crate::tui_shell) struct App<S> {
    pub(in crate::tui_shell) page: Page<S>,
    pub(in crate::tui_shell) base_url: String,
    pub(in crate::tui_shell) tab: Tab,
    pub(in crate::tui_shell) focus: Focus,
    pub(in crate::tui_shell) list: ListKind,
    pub(in crate::tui_shell) random_sel: usize,
    pub(in crate::tui_shell) item_sel: usize,
    pub(in crate::tui_shell) category_sel: usize,
    pub(in crate::tui_shell) modal: Option<Modal>,
    /// Last informational message (errors go to the page's error surface).
    pub(in crate::tui_shell) note: Option<String>,
    pub(in crate::tui_shell) quit: bool,
}

impl<S: RemoteStore> App<S> {
    pub(in crate::tui_shell) fn new(mut page: Page<S>, base_url: String) -> Self {
        page.open();
        Self {
            page,
            base_url,
            tab: Tab::Rando,
            focus: Focus::Items,
            list: ListKind::Active,
            random_sel: 0,
            item_sel: 0,
            category_sel: 0,
            modal: None,
            note: None,
            quit: false,
        }
    }

    pub(in crate::tui_shell) fn note(&mut self, msg: impl Into<String>) {
        self.note = Some(msg.into());
    }

    pub(in crate::tui_shell) fn items(&self) -> &[Item] {
        match self.list {
            ListKind::Active => self.page.active().entities(),
            ListKind::Completed => self.page.completed().entities(),
        }
    }

    pub(in crate::tui_shell) fn item_rows(&self, list: ListKind) -> &Rows<ItemId> {
        match list {
            ListKind::Active => self.page.active().rows(),
            ListKind::Completed => self.page.completed().rows(),
        }
    }

    pub(in crate::tui_shell) fn item_rows_mut(&mut self, list: ListKind) -> &mut Rows<ItemId> {
        match list {
            ListKind::Active => self.page.active_mut().rows_mut(),
            ListKind::Completed => self.page.completed_mut().rows_mut(),
        }
    }

    /// The item under the cursor, and the list it lives in.
    pub(in crate::tui_shell) fn selected_item(&self) -> Option<(&Item, ListKind)> {
        match self.focus {
            Focus::Random => self
                .page
                .random()
                .items()
                .get(self.random_sel)
                .map(|i| (i, ListKind::Active)),
            Focus::Items => self.items().get(self.item_sel).map(|i| (i, self.list)),
        }
    }

    pub(in crate::tui_shell) fn selected_category(&self) -> Option<&Category> {
        self.page.categories().entities().get(self.category_sel)
    }

    pub(in crate::tui_shell) fn move_cursor(&mut self, step: isize) {
        let (sel, len) = match (self.tab, self.focus) {
            (Tab::Categories, _) => (
                &mut self.category_sel,
                self.page.categories().entities().len(),
            ),
            (Tab::Rando, Focus::Random) => (&mut self.random_sel, self.page.random().items().len()),
            (Tab::Rando, Focus::Items) => {
                let len = match self.list {
                    ListKind::Active => self.page.active().entities().len(),
                    ListKind::Completed => self.page.completed().entities().len(),
                };
                (&mut self.item_sel, len)
            }
        };
        if len == 0 {
            *sel = 0;
            return;
        }
        *sel = (*sel as isize + step).clamp(0, len as isize - 1) as usize;
    }

    /// Keep cursors in range and drop dialogs whose row a reload replaced.
    pub(in crate::tui_shell) fn settle(&mut self) {
        let clamp = |sel: &mut usize, len: usize| *sel = (*sel).min(len.saturating_sub(1));
        clamp(&mut self.random_sel, self.page.random().items().len());
        let len = self.items().len();
        clamp(&mut self.item_sel, len);
        clamp(
            &mut self.category_sel,
            self.page.categories().entities().len(),
        );

        if self.modal.as_ref().is_some_and(|m| !self.row_alive(m)) {
            self.modal = None;
            self.note("The store changed that row; the dialog was closed");
        }
    }

    fn row_alive(&self, modal: &Modal) -> bool {
        match modal {
            Modal::Form(form) => match &form.target {
                FormTarget::EditItem(id) => matches!(
                    self.page.active().rows().mode(id),
                    Some(RowMode::Editing { .. })
                ),
                FormTarget::RenameCategory(c) => matches!(
                    self.page.categories().rows().mode(c),
                    Some(RowMode::Editing { .. })
                ),
                FormTarget::AddItem | FormTarget::AddCategory => true,
            },
            Modal::Confirm(confirm) => self.item_rows(confirm.list).mode(&confirm.id).is_some(),
            Modal::Migrate { category, .. } => matches!(
                self.page.categories().rows().mode(category),
                Some(RowMode::Deleting { .. })
            ),
            Modal::PickCategory { .. } => true,
        }
    }
}
