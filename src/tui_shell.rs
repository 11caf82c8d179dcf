//! The interactive page: random set, item lists and category manager.

use anyhow::Result;

mod app;
mod input;
mod modal;

use app::{App, Focus, ListKind, Tab};
use input::Input;
use modal::{Confirm, ConfirmAction, Form, FormTarget, Modal};

pub(crate) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}

#[cfg(test)]
#[path = "tests/tui_shell/app_tests.rs"]
mod tests;
