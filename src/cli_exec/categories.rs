use randocube::lifecycle::MigrationChoice;

use super::*;

pub(super) fn handle_category_command(
    settings: &Settings,
    command: CategoryCommands,
) -> Result<()> {
    let mut page = open_page(settings)?;
    match command {
        CategoryCommands::List { json } => {
            let categories = page.categories().entities();
            if json {
                print_json(categories, "categories")?;
            } else if categories.is_empty() {
                println!("No categories yet");
            } else {
                for c in categories {
                    println!("{}", c);
                }
            }
        }
        CategoryCommands::Add { name } => {
            page.add_category(Category::new(name.as_str()))?;
            check(&page)?;
            println!("Added category {}", name.trim());
        }
        CategoryCommands::Rename { old, new } => {
            page.rename_category(Category::new(old.as_str()), Category::new(new.as_str()))?;
            check(&page)?;
            println!("Renamed {} to {}", old, new.trim());
        }
        CategoryCommands::Delete { name, migrate_to } => {
            let choice = match category_arg(migrate_to) {
                Some(to) => MigrationChoice::MigrateTo(to),
                None => MigrationChoice::DoNotMigrate,
            };
            let summary = choice.to_string();
            page.delete_category(Category::new(name.as_str()), choice)?;
            check(&page)?;
            println!("Deleted {} ({})", name, summary.to_lowercase());
        }
    }
    Ok(())
}
