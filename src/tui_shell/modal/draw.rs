use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::remote::RemoteStore;
use crate::schema::{self, FieldKind};

use super::super::App;
use super::{Form, Modal};

fn centered(area: Rect, height: u16) -> Rect {
    let w = area.width.saturating_sub(6).clamp(20, 70);
    let h = height.min(area.height.saturating_sub(2)).max(5);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    }
}

pub(in crate::tui_shell) fn draw_modal<S: RemoteStore>(
    frame: &mut ratatui::Frame,
    app: &App<S>,
    modal: &Modal,
) {
    match modal {
        Modal::Form(form) => draw_form(frame, app, form),
        Modal::Confirm(confirm) => {
            let lines = vec![
                Line::from(confirm.question()),
                Line::from(""),
                Line::from(Span::styled(
                    "y/Enter confirm   n/Esc cancel",
                    Style::default().fg(Color::Gray),
                )),
            ];
            draw_box(frame, "Confirm", lines, 7);
        }
        Modal::Migrate {
            category,
            options,
            selected,
        } => {
            let mut lines = vec![Line::from(format!("Delete category {}", category)), Line::from("")];
            if options.is_empty() {
                lines.push(Line::from("No other category to move its items to."));
            }
            for (i, choice) in options.iter().enumerate() {
                lines.push(option_line(&choice.to_string(), i == *selected));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Up/Down choose   Enter delete   Esc cancel",
                Style::default().fg(Color::Gray),
            )));
            let h = lines.len() as u16 + 2;
            draw_box(frame, "Delete category", lines, h);
        }
        Modal::PickCategory { options, selected } => {
            let lines: Vec<Line> = options
                .iter()
                .enumerate()
                .map(|(i, o)| option_line(&o.label, i == *selected))
                .collect();
            let h = lines.len() as u16 + 2;
            draw_box(frame, "Category", lines, h);
        }
    }
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {}", label),
            Style::default().add_modifier(Modifier::REVERSED),
        ))
    } else {
        Line::from(format!("  {}", label))
    }
}

fn draw_box(frame: &mut ratatui::Frame, title: &str, lines: Vec<Line>, height: u16) {
    let area = centered(frame.area(), height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn draw_form<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>, form: &Form) {
    let values = app.form_values(form);
    let views = schema::render(&form.fields, &values);

    let area = centered(frame.area(), views.len() as u16 * 3 + 4);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.target.title());
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let mut constraints: Vec<Constraint> = views.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1));
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, view) in views.iter().enumerate() {
        let focused = i == form.focus;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let mut title = view.field.key.clone();
        if view.field.disabled {
            title.push_str(" (fixed)");
        }
        let text = match view.field.kind {
            FieldKind::Text if focused => form.input.buf.clone(),
            FieldKind::Text => view.value.clone(),
            FieldKind::Select(_) => format!("< {} >", view.display()),
        };
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            ),
            parts[i],
        );
        if focused && form.focused_is_text() {
            let x = parts[i].x + 1 + form.input.cursor as u16;
            frame.set_cursor_position((x, parts[i].y + 1));
        }
    }

    let mut hint = "Tab next field   Left/Right change choice   Enter save   Esc cancel".to_string();
    if matches!(
        form.target,
        super::FormTarget::AddItem | super::FormTarget::EditItem(_)
    ) {
        hint.push_str(if form.ignore_duplicate {
            "   Ctrl-D duplicates: allowed"
        } else {
            "   Ctrl-D allow duplicate title"
        });
    }
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))).wrap(Wrap { trim: true }),
        parts[views.len()],
    );
}
