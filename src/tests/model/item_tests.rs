use super::*;

#[test]
fn item_parses_wire_dates_and_missing_completion() {
    let item: Item = serde_json::from_value(serde_json::json!({
        "id": 4,
        "title": "Dune",
        "category": "Books",
        "priority": "HIGH",
        "added": "2024-01-09",
        "completed": null
    }))
    .expect("parse item");
    assert_eq!(item.id, ItemId(4));
    assert_eq!(item.priority, Priority::High);
    assert_eq!(fmt_date(item.added), "2024-01-09");
    assert!(!item.is_completed());
}

#[test]
fn empty_completed_string_means_active() {
    let item: Item = serde_json::from_value(serde_json::json!({
        "id": 1,
        "title": "Chess",
        "category": "Games",
        "priority": "LOW",
        "added": "2023-12-31",
        "completed": ""
    }))
    .expect("parse item");
    assert_eq!(item.completed, None);
}

#[test]
fn completed_item_serializes_back_to_the_same_shape() {
    let raw = serde_json::json!({
        "id": 2,
        "title": "Go",
        "category": "Games",
        "priority": "MEDIUM",
        "added": "2024-02-01",
        "completed": "2024-02-03"
    });
    let item: Item = serde_json::from_value(raw.clone()).expect("parse item");
    assert!(item.is_completed());
    assert_eq!(serde_json::to_value(&item).expect("serialize"), raw);
}

#[test]
fn new_drafts_omit_the_id() {
    let draft = ItemDraft::new("Dune", Category::from("Books"), Priority::Low);
    let v = serde_json::to_value(&draft).expect("serialize");
    assert!(v.get("id").is_none());
    assert_eq!(v["priority"], "LOW");
}

#[test]
fn priority_parses_wire_names_case_insensitively() {
    assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
    assert_eq!(" LOW ".parse::<Priority>(), Ok(Priority::Low));
    assert!("urgent".parse::<Priority>().is_err());
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn priority_weights_favor_high() {
    let w: Vec<u32> = Priority::ALL.iter().map(|p| p.weight()).collect();
    assert_eq!(w, vec![6, 3, 1]);
}

#[test]
fn category_names_compare_case_insensitively() {
    let c = Category::from("Books");
    assert!(c.same_name("books"));
    assert!(!c.same_name("Book"));
    assert!(Category::from("  ").is_blank());
}

#[test]
fn envelope_splits_payload_and_error() {
    #[derive(Debug, Default, serde::Deserialize)]
    struct Names {
        #[serde(default)]
        categories: Vec<Category>,
    }

    let env: Envelope<Names> =
        serde_json::from_str(r#"{"categories":["A","B"],"error":null}"#).expect("parse");
    assert_eq!(env.payload.categories.len(), 2);
    assert_eq!(env.error, None);

    let env: Envelope<Names> =
        serde_json::from_str(r#"{"error":"nope"}"#).expect("parse");
    assert!(env.payload.categories.is_empty());
    assert_eq!(env.error.as_deref(), Some("nope"));
}
