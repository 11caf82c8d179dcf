use anyhow::{Context, Result};

use randocube::model::{Category, Item, ItemId};
use randocube::page::Page;
use randocube::remote::HttpStore;

use crate::cli_runtime::Settings;
use crate::{CategoryCommands, Commands, ConfigCommands, ItemCommands};

mod admin;
mod categories;
mod items;

pub(super) fn handle_command(settings: &Settings, command: Commands) -> Result<()> {
    match command {
        Commands::Ping => admin::handle_ping_command(settings)?,
        Commands::Reload => admin::handle_reload_command(settings)?,
        Commands::Config { command } => admin::handle_config_command(settings, command)?,
        Commands::Categories { command } => {
            categories::handle_category_command(settings, command)?
        }
        Commands::Items { command } => items::handle_item_command(settings, command)?,
        Commands::Random(args) => {
            items::handle_random_command(settings, args.category, args.new, args.json)?
        }
    }
    Ok(())
}

fn connect(settings: &Settings) -> Result<HttpStore> {
    HttpStore::new(&settings.config.base_url)
}

/// A page with every list loaded, or the first load error.
fn open_page(settings: &Settings) -> Result<Page<HttpStore>> {
    let mut page = Page::new(connect(settings)?);
    page.open();
    check(&page)?;
    Ok(page)
}

/// Fail the command if anything ended up on the page's error surface.
fn check(page: &Page<HttpStore>) -> Result<()> {
    match page.errors().current() {
        Some(msg) => anyhow::bail!("{}", msg),
        None => Ok(()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T, label: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", label))?
    );
    Ok(())
}

fn print_items(items: &[Item], columns: &[&str]) {
    if items.is_empty() {
        println!("(none)");
        return;
    }
    for item in items {
        let row = randocube::schema::view_row(item, columns);
        println!("{:>4}  {}", item.id, row.join("  "));
    }
}

fn category_arg(name: Option<String>) -> Option<Category> {
    name.map(Category::new).filter(|c| !c.is_blank())
}

fn item_id(id: u32) -> ItemId {
    ItemId(id)
}
