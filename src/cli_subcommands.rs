use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum CategoryCommands {
    /// List categories
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a category
    Add { name: String },

    /// Rename a category
    Rename { old: String, new: String },

    /// Delete a category
    Delete {
        name: String,
        /// Move the category's items here instead of leaving them to the store
        #[arg(long, value_name = "CATEGORY")]
        migrate_to: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ItemCommands {
    /// List active (or completed) items
    List {
        #[arg(long)]
        category: Option<String>,
        /// List completed items instead
        #[arg(long)]
        completed: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an item
    Add {
        title: String,
        /// Defaults to the first category
        #[arg(long)]
        category: Option<String>,
        /// high|medium|low
        #[arg(long)]
        priority: Option<String>,
        /// Save even if another item has the same title
        #[arg(long)]
        allow_duplicate: bool,
    },

    /// Change an active item's title, category or priority
    Edit {
        id: u32,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// high|medium|low
        #[arg(long)]
        priority: Option<String>,
        /// Save even if another item has the same title
        #[arg(long)]
        allow_duplicate: bool,
    },

    /// Delete an item (active or completed)
    Delete { id: u32 },

    /// Mark an item completed
    Complete { id: u32 },

    /// Move a completed item back to the active list
    Uncomplete { id: u32 },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the config in effect
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the store URL
    Set {
        #[arg(long)]
        url: String,
    },
}
