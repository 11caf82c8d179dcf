//! Category lifecycle rules: migration choices and the client-side checks that
//! run before any category change is sent.

use std::fmt;

use crate::errors::ClientError;
use crate::model::Category;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationChoice {
    DoNotMigrate,
    MigrateTo(Category),
}

impl MigrationChoice {
    /// Form value of the choice; "do not migrate" is the empty string.
    pub fn value(&self) -> &str {
        match self {
            MigrationChoice::DoNotMigrate => "",
            MigrationChoice::MigrateTo(c) => c.as_str(),
        }
    }

    pub fn from_value(value: &str) -> Self {
        if value.is_empty() {
            MigrationChoice::DoNotMigrate
        } else {
            MigrationChoice::MigrateTo(Category::new(value))
        }
    }

    pub fn target(&self) -> Option<&Category> {
        match self {
            MigrationChoice::DoNotMigrate => None,
            MigrationChoice::MigrateTo(c) => Some(c),
        }
    }
}

impl fmt::Display for MigrationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationChoice::DoNotMigrate => f.write_str("Do not migrate"),
            MigrationChoice::MigrateTo(c) => write!(f, "Migrate to {}", c),
        }
    }
}

/// Where the items of `target` may go when it is deleted.
///
/// "Do not migrate" comes first, then every other category in display order.
/// With no other category there is nothing to choose between, so the list is
/// empty rather than holding a lone no-op entry.
pub fn migration_options(categories: &[Category], target: &Category) -> Vec<MigrationChoice> {
    let others: Vec<&Category> = categories.iter().filter(|c| *c != target).collect();
    if others.is_empty() {
        return Vec::new();
    }
    std::iter::once(MigrationChoice::DoNotMigrate)
        .chain(others.into_iter().cloned().map(MigrationChoice::MigrateTo))
        .collect()
}

fn find<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.same_name(name))
}

pub fn check_add(categories: &[Category], name: &Category) -> Result<(), ClientError> {
    if name.is_blank() {
        return Err(ClientError::BlankCategory);
    }
    if find(categories, name.as_str()).is_some() {
        return Err(ClientError::DuplicateCategory(name.clone()));
    }
    Ok(())
}

/// Checks a rename and returns the stored spelling of `old`, which is matched
/// case-insensitively.
pub fn check_rename(
    categories: &[Category],
    old: &Category,
    new: &Category,
) -> Result<Category, ClientError> {
    let old = find(categories, old.as_str())
        .ok_or_else(|| ClientError::UnknownCategory(old.clone()))?;
    if new.is_blank() {
        return Err(ClientError::BlankCategory);
    }
    if old == new {
        return Err(ClientError::UnchangedCategory(old.clone()));
    }
    // A case-only rename of `old` itself is allowed.
    match find(categories, new.as_str()) {
        Some(existing) if existing != old => Err(ClientError::DuplicateCategory(new.clone())),
        _ => Ok(old.clone()),
    }
}

/// Checks a delete and returns the stored spellings of `name` and of the
/// migration target.
pub fn check_delete(
    categories: &[Category],
    name: &Category,
    migrate_to: Option<&Category>,
) -> Result<(Category, Option<Category>), ClientError> {
    let name = find(categories, name.as_str())
        .ok_or_else(|| ClientError::UnknownCategory(name.clone()))?;
    if categories.len() == 1 {
        return Err(ClientError::LastCategory(name.clone()));
    }
    let target = match migrate_to {
        None => None,
        Some(to) if to.same_name(name.as_str()) => {
            return Err(ClientError::MigrateToSelf(name.clone()));
        }
        Some(to) => Some(
            find(categories, to.as_str())
                .cloned()
                .ok_or_else(|| ClientError::UnknownCategory(to.clone()))?,
        ),
    };
    Ok((name.clone(), target))
}

/// The category selection to use once `name` has been deleted. Only changes if
/// `name` was the selection.
pub fn selection_after_delete(
    selected: Option<&Category>,
    name: &Category,
    migrate_to: Option<&Category>,
) -> Option<Category> {
    match selected {
        Some(s) if s == name => migrate_to.cloned(),
        other => other.cloned(),
    }
}

/// The category selection to use once `old` has been renamed to `new`.
pub fn selection_after_rename(
    selected: Option<&Category>,
    old: &Category,
    new: &Category,
) -> Option<Category> {
    match selected {
        Some(s) if s == old => Some(new.clone()),
        other => other.cloned(),
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
