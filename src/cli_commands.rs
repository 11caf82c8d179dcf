use clap::{Args, Subcommand};

use crate::{CategoryCommands, ConfigCommands, ItemCommands};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check that the store is up
    Ping,

    /// Ask the store to re-read its save file
    Reload,

    /// List and manage categories
    #[command(alias = "cat")]
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// List and manage items
    Items {
        #[command(subcommand)]
        command: ItemCommands,
    },

    /// Show the random set for a category
    Random(RandomArgs),

    /// Show or change the client config
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub(crate) struct RandomArgs {
    #[arg(long)]
    pub(crate) category: String,
    /// Draw a new set instead of showing the current one
    #[arg(long)]
    pub(crate) new: bool,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
