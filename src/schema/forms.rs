//! Item and category forms, and the typed records behind them.

use super::{FieldDescriptor, FormValues, SchemaError, SelectOption};
use crate::model::{Category, Item, ItemDraft, Priority, fmt_date};

pub const KEY_ID: &str = "ID";
pub const KEY_TITLE: &str = "Title";
pub const KEY_CATEGORY: &str = "Category";
pub const KEY_PRIORITY: &str = "Priority";
pub const KEY_ADDED: &str = "Added";
pub const KEY_COMPLETED: &str = "Completed";

pub const ACTIVE_COLUMNS: &[&str] = &[KEY_TITLE, KEY_CATEGORY, KEY_PRIORITY, KEY_ADDED];
pub const COMPLETED_COLUMNS: &[&str] = &[KEY_TITLE, KEY_CATEGORY, KEY_COMPLETED];
pub const RANDOM_COLUMNS: &[&str] = &[KEY_TITLE, KEY_PRIORITY];

/// A typed record that round-trips through a form.
pub trait FormRecord: Sized {
    fn to_values(&self) -> FormValues;
    fn from_values(values: &FormValues) -> Result<Self, SchemaError>;
}

/// Editable item fields.
///
/// With `pin_category` set and a category scope active, the category field is
/// fixed to the scope; it is still submitted.
pub fn item_fields(
    categories: &[Category],
    scope: Option<&Category>,
    pin_category: bool,
) -> Vec<FieldDescriptor> {
    let category_default = scope
        .or_else(|| categories.first())
        .map(|c| c.to_string())
        .unwrap_or_default();
    let category_options = categories
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.as_str()))
        .collect();
    let priority_options = Priority::ALL
        .into_iter()
        .map(|p| SelectOption::new(p.as_wire(), p.label()))
        .collect();

    vec![
        FieldDescriptor::text(KEY_TITLE, ""),
        FieldDescriptor::select(KEY_CATEGORY, &category_default, category_options)
            .disabled(pin_category && scope.is_some()),
        FieldDescriptor::select(KEY_PRIORITY, Priority::Medium.as_wire(), priority_options),
    ]
}

pub fn category_fields() -> Vec<FieldDescriptor> {
    vec![FieldDescriptor::text(KEY_CATEGORY, "")]
}

impl FormRecord for ItemDraft {
    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with(KEY_TITLE, self.title.clone())
            .with(KEY_CATEGORY, self.category.to_string())
            .with(KEY_PRIORITY, self.priority.as_wire())
    }

    /// Builds a draft without an id; edits set it from the row being edited.
    fn from_values(values: &FormValues) -> Result<Self, SchemaError> {
        let title = values.get(KEY_TITLE).unwrap_or_default().trim().to_string();
        let category = Category::new(values.require(KEY_CATEGORY)?);
        let raw = values.require(KEY_PRIORITY)?;
        let priority = raw.parse::<Priority>().map_err(|_| SchemaError::InvalidValue {
            key: KEY_PRIORITY.to_string(),
            value: raw.to_string(),
        })?;
        Ok(ItemDraft {
            id: None,
            title,
            category,
            priority,
        })
    }
}

impl FormRecord for Category {
    fn to_values(&self) -> FormValues {
        FormValues::new().with(KEY_CATEGORY, self.to_string())
    }

    fn from_values(values: &FormValues) -> Result<Self, SchemaError> {
        Ok(Category::new(values.get(KEY_CATEGORY).unwrap_or_default().trim()))
    }
}

impl Item {
    /// Every displayable attribute, keyed like the form fields.
    pub fn view_values(&self) -> FormValues {
        let values = self
            .draft()
            .to_values()
            .with(KEY_ID, self.id.to_string())
            .with(KEY_PRIORITY, self.priority.label())
            .with(KEY_ADDED, fmt_date(self.added));
        match self.completed {
            Some(d) => values.with(KEY_COMPLETED, fmt_date(d)),
            None => values,
        }
    }
}

pub fn view_row(item: &Item, columns: &[&str]) -> Vec<String> {
    let values = item.view_values();
    columns
        .iter()
        .map(|c| values.get(c).unwrap_or_default().to_string())
        .collect()
}
