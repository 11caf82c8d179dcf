use serde::{Deserialize, Serialize};

mod date_format;
mod ids;
mod item;

pub(crate) use self::date_format::fmt_date;
pub use self::ids::{Category, ItemId};
pub use self::item::{Item, ItemDraft, Priority};

/// Response envelope shared by every remote operation.
///
/// The payload field name differs per operation (`categories`, `items`), so the
/// envelope is generic over a payload struct that is flattened into it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(flatten)]
    pub payload: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "tests/model/item_tests.rs"]
mod tests;
