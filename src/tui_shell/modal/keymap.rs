use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::remote::RemoteStore;
use crate::schema::{self, FieldKind};

use super::super::App;
use super::{Form, Modal};

pub(in crate::tui_shell) fn handle_modal_key<S: RemoteStore>(app: &mut App<S>, key: KeyEvent) {
    let Some(modal) = app.modal.take() else {
        return;
    };
    app.modal = match modal {
        Modal::Form(form) => form_key(app, form, key),
        Modal::Confirm(confirm) => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.confirm(&confirm);
                None
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                app.item_rows_mut(confirm.list).finish(&confirm.id);
                None
            }
            _ => Some(Modal::Confirm(confirm)),
        },
        Modal::Migrate {
            category,
            options,
            mut selected,
        } => match key.code {
            KeyCode::Esc => {
                app.page.categories_mut().rows_mut().finish(&category);
                None
            }
            KeyCode::Enter => app.delete_category(category, options, selected),
            KeyCode::Up | KeyCode::Down if !options.is_empty() => {
                let n = options.len();
                selected = if key.code == KeyCode::Up {
                    (selected + n - 1) % n
                } else {
                    (selected + 1) % n
                };
                app.page
                    .categories_mut()
                    .rows_mut()
                    .set_delete_choice(&category, options[selected].value());
                Some(Modal::Migrate {
                    category,
                    options,
                    selected,
                })
            }
            _ => Some(Modal::Migrate {
                category,
                options,
                selected,
            }),
        },
        Modal::PickCategory {
            options,
            mut selected,
        } => match key.code {
            KeyCode::Esc => None,
            KeyCode::Enter => {
                let value = options
                    .get(selected)
                    .map(|o| o.value.clone())
                    .unwrap_or_default();
                app.select_category(&value);
                None
            }
            KeyCode::Up => {
                selected = selected.saturating_sub(1);
                Some(Modal::PickCategory { options, selected })
            }
            KeyCode::Down => {
                selected = (selected + 1).min(options.len().saturating_sub(1));
                Some(Modal::PickCategory { options, selected })
            }
            _ => Some(Modal::PickCategory { options, selected }),
        },
    };
}

fn form_key<S: RemoteStore>(app: &mut App<S>, mut form: Form, key: KeyEvent) -> Option<Modal> {
    let values = app.form_values(&form);
    let field_key = form.focused().key.clone();

    match key.code {
        KeyCode::Esc => {
            app.finish_form(&form.target);
            return None;
        }
        KeyCode::Enter => return app.submit_form(form),
        KeyCode::Tab | KeyCode::Down => form.step_focus(1, &values),
        KeyCode::BackTab | KeyCode::Up => form.step_focus(-1, &values),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.ignore_duplicate = !form.ignore_duplicate;
        }
        KeyCode::Left | KeyCode::Right
            if matches!(form.focused().kind, FieldKind::Select(_)) =>
        {
            let step = if key.code == KeyCode::Left { -1 } else { 1 };
            match schema::cycle_option(&form.fields, &values, &field_key, step) {
                Ok(next) => app.set_form_values(&mut form, next),
                Err(err) => app.note(err.to_string()),
            }
        }
        KeyCode::Left => form.input.move_left(),
        KeyCode::Right => form.input.move_right(),
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char(_) if form.focused_is_text() => {
            match key.code {
                KeyCode::Backspace => form.input.backspace(),
                KeyCode::Delete => form.input.delete(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.input.insert_char(c)
                }
                _ => {}
            }
            match schema::apply_change(&form.fields, &values, &field_key, &form.input.buf) {
                Ok(next) => app.set_form_values(&mut form, next),
                Err(err) => app.note(err.to_string()),
            }
        }
        _ => {}
    }
    Some(Modal::Form(form))
}
