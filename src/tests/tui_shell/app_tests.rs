use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::app::{draw, handle_key};
use super::*;
use crate::model::{Category, ItemDraft, ItemId, Priority};
use crate::page::Page;
use crate::reconcile::RowMode;
use crate::remote::RemoteStore;
use crate::test_support::FakeStore;

fn store() -> FakeStore {
    let store = FakeStore::with_categories(&["Books", "Games"]);
    store.seed_item("Dune", "Books", Priority::High);
    store.seed_item("Emma", "Books", Priority::Low);
    store.seed_item("Chess", "Games", Priority::Medium);
    store
}

fn app(store: &FakeStore) -> App<&FakeStore> {
    App::new(Page::new(store), "http://test".to_string())
}

fn press(app: &mut App<&FakeStore>, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App<&FakeStore>, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen(app: &App<&FakeStore>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).expect("terminal");
    terminal.draw(|f| draw(f, app)).expect("draw");
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn add_form_saves_into_the_scoped_category() {
    let store = store();
    let mut app = app(&store);
    app.select_category("Games");

    press(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "Go");
    press(&mut app, KeyCode::Enter);

    assert!(app.modal.is_none());
    let go = store
        .active()
        .into_iter()
        .find(|i| i.title == "Go")
        .expect("saved");
    assert_eq!(go.category, Category::from("Games"));
    assert_eq!(app.items().len(), 2);
}

#[test]
fn edit_draft_lives_in_the_row_until_cancelled() {
    let store = store();
    let mut app = app(&store);
    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, " Messiah");

    match app.page.active().rows().mode(&ItemId(1)) {
        Some(RowMode::Editing { draft }) => assert_eq!(draft.get("Title"), Some("Dune Messiah")),
        other => panic!("unexpected row mode {:?}", other),
    }
    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
    assert_eq!(app.page.active().rows().mode(&ItemId(1)), None);
    assert_eq!(store.active()[0].title, "Dune");
}

#[test]
fn reload_that_replaces_the_row_closes_its_dialog() {
    let store = store();
    let mut app = app(&store);
    press(&mut app, KeyCode::Char('e'));
    assert!(app.modal.is_some());

    let mut changed = ItemDraft::new("Dune (2021)", Category::from("Books"), Priority::High);
    changed.id = Some(ItemId(1));
    store.save_item(&changed, false).expect("external edit");
    app.page.refresh_all();
    app.settle();

    assert!(app.modal.is_none());
    assert!(app.note.is_some());
}

#[test]
fn category_delete_uses_the_chosen_migration() {
    let store = store();
    let mut app = app(&store);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.tab, Tab::Categories);

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);

    assert!(app.modal.is_none());
    assert_eq!(app.page.categories().entities(), &[Category::from("Games")]);
    assert!(
        store
            .active()
            .iter()
            .all(|i| i.category == Category::from("Games"))
    );
}

#[test]
fn complete_from_the_random_pane() {
    let store = store();
    let mut app = app(&store);
    app.select_category("Games");
    press(&mut app, KeyCode::Left);
    assert_eq!(app.focus, Focus::Random);

    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Char('y'));
    assert_eq!(store.completed().len(), 1);
    assert!(app.page.random().items().is_empty());
    assert!(screen(&app).contains("Nothing to choose"));
}

#[test]
fn store_errors_show_in_the_banner() {
    let store = store();
    let mut app = app(&store);
    store.fail_next("list_active_items", "store is on fire");
    press(&mut app, KeyCode::Char('g'));
    assert!(screen(&app).contains("store is on fire"));
}

#[test]
fn input_edits_by_character() {
    let mut input = Input::default();
    for c in "héllo".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "hélo");
    input.set("ça");
    input.backspace();
    assert_eq!(input.buf, "ç");
}
