use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::page::SELECT_CATEGORY_LABEL;
use crate::schema::{ACTIVE_COLUMNS, COMPLETED_COLUMNS, RANDOM_COLUMNS, view_row};

use super::super::modal;
use super::*;

const MAX_COLUMN: usize = 32;

pub(in crate::tui_shell) fn draw<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>) {
    let error = app.page.errors().current();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(if error.is_some() { 3 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    if let Some(msg) = error {
        frame.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Error")),
            chunks[1],
        );
    }

    match app.tab {
        Tab::Rando => draw_rando(frame, app, chunks[2]),
        Tab::Categories => draw_categories(frame, app, chunks[2]),
    }

    draw_footer(frame, app, chunks[3]);

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, app, m);
    }
}

fn draw_header<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let tab_style = |on: bool| {
        if on {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let category = app
        .page
        .selected()
        .map(|c| c.to_string())
        .unwrap_or_else(|| SELECT_CATEGORY_LABEL.to_string());
    let spans = vec![
        Span::styled("RandoCube", Style::default().fg(Color::Black).bg(Color::White)),
        Span::raw("  "),
        Span::styled(" Rando ", tab_style(app.tab == Tab::Rando)),
        Span::raw(" "),
        Span::styled(" Categories ", tab_style(app.tab == Tab::Categories)),
        Span::raw("  "),
        Span::styled(category, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(app.base_url.as_str(), Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_footer<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let keys = match app.tab {
        Tab::Rando => {
            "c category  n new set  Left/Right pane  a add  e edit  d delete  m complete  u unmark  v active/completed  g reload  Tab categories  q quit"
        }
        Tab::Categories => "a add  r rename  d delete  Enter open  g reload  Tab rando  q quit",
    };
    let mut lines = Vec::new();
    if let Some(note) = &app.note {
        lines.push(Line::from(Span::styled(
            note.as_str(),
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(Span::styled(keys, Style::default().fg(Color::Gray))));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn row_marker(mode: Option<&RowMode>) -> &'static str {
    match mode {
        Some(RowMode::Editing { .. }) => "edit ",
        Some(RowMode::Deleting { .. }) => "del? ",
        Some(RowMode::Marking) => "mark ",
        None => "     ",
    }
}

fn column_widths(header: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN)
        })
        .collect()
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| {
            let cut: String = c.chars().take(*w).collect();
            format!("{:<width$}", cut, width = *w)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// One boxed item table.
struct Pane<'a> {
    title: String,
    items: &'a [Item],
    columns: &'a [&'a str],
    rows: &'a Rows<ItemId>,
    selected: Option<usize>,
    empty: &'a str,
}

fn draw_items(frame: &mut ratatui::Frame, area: Rect, pane: Pane<'_>) {
    let Pane {
        title,
        items,
        columns,
        rows,
        selected,
        empty,
    } = pane;
    let block = Block::default().borders(Borders::ALL).title(title);
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(empty.to_string(), Style::default().fg(Color::Gray)))
                .block(block),
            area,
        );
        return;
    }

    let cells: Vec<Vec<String>> = items.iter().map(|i| view_row(i, columns)).collect();
    let widths = column_widths(columns, &cells);
    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

    let mut list_items = vec![ListItem::new(Line::from(Span::styled(
        format!("     {}", pad_row(&header, &widths)),
        Style::default().add_modifier(Modifier::BOLD),
    )))];
    for (item, row) in items.iter().zip(&cells) {
        let marker = row_marker(rows.mode(&item.id));
        list_items.push(ListItem::new(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::raw(pad_row(row, &widths)),
        ])));
    }

    let mut state = ListState::default().with_selected(selected.map(|s| s + 1));
    frame.render_stateful_widget(
        List::new(list_items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
        area,
        &mut state,
    );
}

fn draw_rando<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let random_len = app.page.random().items().len().max(1) as u16;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(random_len + 3), Constraint::Min(0)])
        .split(area);

    let random_title = match app.page.random().category() {
        Some(c) => format!("Random set: {}  (n new set)", c),
        None => "Random set".to_string(),
    };
    let empty = if app.page.random().category().is_some() {
        "Nothing to choose"
    } else {
        "Select a category to draw a random set (c)"
    };
    draw_items(
        frame,
        parts[0],
        Pane {
            title: random_title,
            items: app.page.random().items(),
            columns: RANDOM_COLUMNS,
            rows: app.page.active().rows(),
            selected: (app.focus == Focus::Random).then_some(app.random_sel),
            empty,
        },
    );

    let (title, columns) = match app.list {
        ListKind::Active => ("Active items (v completed)", ACTIVE_COLUMNS),
        ListKind::Completed => ("Completed items (v active)", COMPLETED_COLUMNS),
    };
    draw_items(
        frame,
        parts[1],
        Pane {
            title: title.to_string(),
            items: app.items(),
            columns,
            rows: app.item_rows(app.list),
            selected: (app.focus == Focus::Items).then_some(app.item_sel),
            empty: "No items",
        },
    );
}

fn draw_categories<S: RemoteStore>(frame: &mut ratatui::Frame, app: &App<S>, area: Rect) {
    let rows = app.page.categories().rows();
    let selected = app.page.selected();
    let items: Vec<ListItem> = app
        .page
        .categories()
        .entities()
        .iter()
        .map(|c| {
            let current = if selected == Some(c) { " *" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(row_marker(rows.mode(c)), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}{}", c, current)),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title("Categories");
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No categories yet; press a to add one").block(block),
            area,
        );
        return;
    }
    let mut state = ListState::default().with_selected(Some(app.category_sel));
    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
        area,
        &mut state,
    );
}
