//! Field descriptors and the pure functions that turn them into forms.
//!
//! One descriptor list drives both the add form (fresh defaults) and the edit
//! form (seeded with the record's values), so the two cannot drift apart in
//! field set or order.

use std::collections::BTreeMap;

mod forms;

pub use self::forms::{
    ACTIVE_COLUMNS, COMPLETED_COLUMNS, FormRecord, KEY_ADDED, KEY_CATEGORY, KEY_COMPLETED, KEY_ID,
    KEY_PRIORITY, KEY_TITLE, RANDOM_COLUMNS, category_fields, item_fields, view_row,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field is fixed in this view: {0}")]
    DisabledField(String),

    #[error("{value:?} is not a valid choice for {key}")]
    InvalidOption { key: String, value: String },

    #[error("{key} is required")]
    MissingField { key: String },

    #[error("invalid {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select(Vec<SelectOption>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub kind: FieldKind,
    pub initial: String,

    /// Shown but not editable. A disabled field is still submitted.
    pub disabled: bool,
}

impl FieldDescriptor {
    pub fn text(key: &str, initial: &str) -> Self {
        Self {
            key: key.to_string(),
            kind: FieldKind::Text,
            initial: initial.to_string(),
            disabled: false,
        }
    }

    pub fn select(key: &str, initial: &str, options: Vec<SelectOption>) -> Self {
        Self {
            key: key.to_string(),
            kind: FieldKind::Select(options),
            initial: initial.to_string(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        match &self.kind {
            FieldKind::Select(options) => options,
            FieldKind::Text => &[],
        }
    }
}

/// Current value of every field, keyed by field key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn require(&self, key: &str) -> Result<&str, SchemaError> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SchemaError::MissingField {
                key: key.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One field as an editor shows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub field: &'a FieldDescriptor,
    pub value: String,

    /// Index of `value` among the options of a select field.
    pub selected: Option<usize>,
}

impl FieldView<'_> {
    /// What to print for the value: a select shows its option label.
    pub fn display(&self) -> &str {
        match self.selected {
            Some(i) => &self.field.options()[i].label,
            None => &self.value,
        }
    }
}

pub fn fresh_values(fields: &[FieldDescriptor]) -> FormValues {
    let mut values = FormValues::new();
    for f in fields {
        values.set(&f.key, f.initial.clone());
    }
    values
}

pub fn seed_values(fields: &[FieldDescriptor], current: &FormValues) -> FormValues {
    let mut values = FormValues::new();
    for f in fields {
        let v = current.get(&f.key).unwrap_or(f.initial.as_str());
        values.set(&f.key, v);
    }
    values
}

pub fn render<'a>(fields: &'a [FieldDescriptor], values: &FormValues) -> Vec<FieldView<'a>> {
    fields
        .iter()
        .map(|f| {
            let value = values.get(&f.key).unwrap_or(f.initial.as_str()).to_string();
            let selected = f.options().iter().position(|o| o.value == value);
            FieldView {
                field: f,
                value,
                selected,
            }
        })
        .collect()
}

fn field<'a>(fields: &'a [FieldDescriptor], key: &str) -> Result<&'a FieldDescriptor, SchemaError> {
    fields
        .iter()
        .find(|f| f.key == key)
        .ok_or_else(|| SchemaError::UnknownField(key.to_string()))
}

pub fn apply_change(
    fields: &[FieldDescriptor],
    values: &FormValues,
    key: &str,
    value: &str,
) -> Result<FormValues, SchemaError> {
    let f = field(fields, key)?;
    if f.disabled {
        return Err(SchemaError::DisabledField(key.to_string()));
    }
    if let FieldKind::Select(options) = &f.kind {
        if !options.iter().any(|o| o.value == value) {
            return Err(SchemaError::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }
    let mut next = values.clone();
    next.set(key, value);
    Ok(next)
}

/// Step a select field to the next (`step > 0`) or previous option, wrapping.
pub fn cycle_option(
    fields: &[FieldDescriptor],
    values: &FormValues,
    key: &str,
    step: isize,
) -> Result<FormValues, SchemaError> {
    let f = field(fields, key)?;
    let options = f.options();
    if options.is_empty() {
        return Ok(values.clone());
    }
    let current = values.get(key).unwrap_or(f.initial.as_str());
    let n = options.len() as isize;
    let next = match options.iter().position(|o| o.value == current) {
        Some(i) => (i as isize + step).rem_euclid(n),
        None => 0,
    };
    apply_change(fields, values, key, &options[next as usize].value)
}

/// The submitted value mapping: exactly the descriptor keys, disabled ones
/// included.
pub fn submit(fields: &[FieldDescriptor], values: &FormValues) -> FormValues {
    seed_values(fields, values)
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
