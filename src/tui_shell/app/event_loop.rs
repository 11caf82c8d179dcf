use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::super::modal;
use super::*;

pub(super) fn run_loop<S: RemoteStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

pub(in crate::tui_shell) fn handle_key<S: RemoteStore>(app: &mut App<S>, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        app.settle();
        return;
    }
    app.note = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Tab => {
            app.tab = match app.tab {
                Tab::Rando => Tab::Categories,
                Tab::Categories => Tab::Rando,
            };
        }
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Char('g') => {
            app.page.refresh_all();
            if !app.page.errors().is_set() {
                app.note("Reloaded");
            }
        }
        _ => match app.tab {
            Tab::Rando => rando_key(app, key),
            Tab::Categories => categories_key(app, key),
        },
    }
    app.settle();
}

fn rando_key<S: RemoteStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.focus = Focus::Random,
        KeyCode::Right => app.focus = Focus::Items,
        KeyCode::Char('c') => app.open_category_picker(),
        KeyCode::Char('n') => app.new_random_set(),
        KeyCode::Char('v') => app.toggle_list(),
        KeyCode::Char('a') => app.open_add_item(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_item(),
        KeyCode::Char('d') => app.open_confirm(ConfirmAction::Delete),
        KeyCode::Char('m') => app.open_confirm(ConfirmAction::Complete),
        KeyCode::Char('u') => app.open_confirm(ConfirmAction::Uncomplete),
        _ => {}
    }
}

fn categories_key<S: RemoteStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => app.open_add_category(),
        KeyCode::Char('r') | KeyCode::Char('e') => app.open_rename_category(),
        KeyCode::Char('d') => app.open_delete_category(),
        KeyCode::Enter => {
            if let Some(c) = app.selected_category().cloned() {
                app.select_category(c.as_str());
                app.tab = Tab::Rando;
            }
        }
        _ => {}
    }
}
