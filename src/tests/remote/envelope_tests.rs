use super::*;

fn categories(raw: &str) -> Result<Vec<Category>, StoreError> {
    let parsed = serde_json::from_str::<Envelope<CategoryList>>(raw).map_err(anyhow::Error::from);
    unwrap_envelope(parsed).map(|l| l.categories)
}

#[test]
fn payload_without_error_is_returned() {
    let got = categories(r#"{"categories":["Books","Games"]}"#).expect("ok");
    assert_eq!(got, vec![Category::from("Books"), Category::from("Games")]);
}

#[test]
fn error_message_wins_over_payload() {
    let err = categories(r#"{"categories":null,"error":"Could not find category: X"}"#)
        .expect_err("error");
    assert_eq!(err.message(), "Could not find category: X");
}

#[test]
fn empty_error_string_is_success() {
    let got = categories(r#"{"categories":[],"error":""}"#).expect("ok");
    assert!(got.is_empty());
}

#[test]
fn null_item_list_reads_as_empty() {
    let parsed = serde_json::from_str::<Envelope<ItemList>>(r#"{"items":null,"error":null}"#)
        .map_err(anyhow::Error::from);
    assert!(unwrap_envelope(parsed).expect("ok").items.is_empty());
}

#[test]
fn transport_failures_become_store_errors() {
    let failed: Result<Envelope<Ack>> =
        Err(anyhow::anyhow!("connection refused").context("save item request"));
    let err = unwrap_envelope(failed).expect_err("error");
    assert_eq!(err.message(), "save item request: connection refused");
}

#[test]
fn request_bodies_use_wire_names() {
    let books = Category::from("Books");
    let games = Category::from("Games");
    let v = serde_json::to_value(RemoveCategoryRequest {
        category: &books,
        migrate_to: Some(&games),
    })
    .expect("serialize");
    assert_eq!(v, serde_json::json!({"category": "Books", "migrateTo": "Games"}));

    let v = serde_json::to_value(EditCategoryRequest {
        old_category: &books,
        new_category: &games,
    })
    .expect("serialize");
    assert_eq!(
        v,
        serde_json::json!({"oldCategory": "Books", "newCategory": "Games"})
    );

    let draft = ItemDraft::new("Dune", books.clone(), crate::model::Priority::High);
    let v = serde_json::to_value(SaveItemRequest {
        item: &draft,
        ignore_duplicate: true,
    })
    .expect("serialize");
    assert_eq!(v["ignoreDuplicate"], true);
    assert_eq!(v["item"]["title"], "Dune");
}

#[test]
fn mutations_describe_themselves_for_logs() {
    let m = Mutation::DeleteCategory {
        name: Category::from("Books"),
        migrate_to: Some(Category::from("Games")),
    };
    assert_eq!(m.to_string(), "delete category Books (migrate to Games)");
    assert_eq!(
        Mutation::SetCompleted {
            id: ItemId(3),
            unmark: true
        }
        .to_string(),
        "unmark item 3"
    );
}
