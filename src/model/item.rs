use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use super::{Category, ItemId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_wire(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Draw weight the store applies when building a random set.
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 6,
            Priority::Medium => 3,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_wire().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown priority: {}", s))
    }
}

/// An item as the store reports it. `completed` is the only thing separating the
/// active list from the completed list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: Category,
    pub priority: Priority,

    #[serde(with = "super::date_format")]
    pub added: Date,

    #[serde(
        default,
        with = "super::date_format::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<Date>,
}

impl Item {
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    /// The editable part of the item, ready to be sent back as an update.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            id: Some(self.id),
            title: self.title.clone(),
            category: self.category.clone(),
            priority: self.priority,
        }
    }
}

/// Save payload. `id: None` asks the store to create the item and assign the id
/// and `added` date; `Some` updates title, category and priority only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>, category: Category, priority: Priority) -> Self {
        Self {
            id: None,
            title: title.into(),
            category,
            priority,
        }
    }
}
