use randocube::model::Priority;
use randocube::schema::{
    self, ACTIVE_COLUMNS, COMPLETED_COLUMNS, FieldDescriptor, FormValues, KEY_CATEGORY,
    KEY_PRIORITY, KEY_TITLE, RANDOM_COLUMNS,
};

use super::*;

pub(super) fn handle_item_command(settings: &Settings, command: ItemCommands) -> Result<()> {
    let mut page = open_page(settings)?;
    match command {
        ItemCommands::List {
            category,
            completed,
            json,
        } => {
            if let Some(c) = category_arg(category) {
                page.select_category(Some(c));
                check(&page)?;
            }
            let (items, columns) = if completed {
                (page.completed().entities(), COMPLETED_COLUMNS)
            } else {
                (page.active().entities(), ACTIVE_COLUMNS)
            };
            if json {
                print_json(items, "items")?;
            } else {
                print_items(items, columns);
            }
        }
        ItemCommands::Add {
            title,
            category,
            priority,
            allow_duplicate,
        } => {
            let fields = page.add_item_fields();
            let mut values = schema::fresh_values(&fields).with(KEY_TITLE, title.as_str());
            values = apply_options(&fields, values, category, priority)?;
            page.add_item(&values, allow_duplicate)?;
            check(&page)?;
            println!("Added {}", title.trim());
        }
        ItemCommands::Edit {
            id,
            title,
            category,
            priority,
            allow_duplicate,
        } => {
            let id = item_id(id);
            let item = page
                .active()
                .find(&id)
                .cloned()
                .with_context(|| format!("no active item with id {}", id))?;
            let fields = page.edit_item_fields();
            let mut values = page.edit_values(&item);
            if let Some(title) = title {
                values = schema::apply_change(&fields, &values, KEY_TITLE, &title)?;
            }
            values = apply_options(&fields, values, category, priority)?;
            page.edit_item(id, &values, allow_duplicate)?;
            check(&page)?;
            println!("Updated {}", id);
        }
        ItemCommands::Delete { id } => {
            page.delete_item(item_id(id))?;
            check(&page)?;
            println!("Deleted {}", id);
        }
        ItemCommands::Complete { id } => {
            page.mark_completed(item_id(id))?;
            check(&page)?;
            println!("Completed {}", id);
        }
        ItemCommands::Uncomplete { id } => {
            page.unmark_completed(item_id(id))?;
            check(&page)?;
            println!("Moved {} back to the active list", id);
        }
    }
    Ok(())
}

/// Apply `--category` and `--priority` through the form, so they are checked
/// against the same options the TUI offers.
fn apply_options(
    fields: &[FieldDescriptor],
    mut values: FormValues,
    category: Option<String>,
    priority: Option<String>,
) -> Result<FormValues> {
    if let Some(c) = category_arg(category) {
        // The store matches names case-insensitively; the form wants the exact option.
        let value = fields
            .iter()
            .filter(|f| f.key == KEY_CATEGORY)
            .flat_map(|f| f.options())
            .find(|o| c.same_name(&o.value))
            .map(|o| o.value.clone())
            .unwrap_or_else(|| c.to_string());
        values = schema::apply_change(fields, &values, KEY_CATEGORY, &value)?;
    }
    if let Some(p) = priority {
        let p: Priority = p.parse().map_err(anyhow::Error::msg)?;
        values = schema::apply_change(fields, &values, KEY_PRIORITY, p.as_wire())?;
    }
    Ok(values)
}

pub(super) fn handle_random_command(
    settings: &Settings,
    category: String,
    new: bool,
    json: bool,
) -> Result<()> {
    let mut page = open_page(settings)?;
    page.select_category(category_arg(Some(category)));
    check(&page)?;
    if new {
        page.new_random_set()?;
        check(&page)?;
    }
    let items = page.random().items();
    if json {
        print_json(items, "random set")?;
    } else if items.is_empty() {
        println!("Nothing to choose");
    } else {
        print_items(items, RANDOM_COLUMNS);
    }
    Ok(())
}
