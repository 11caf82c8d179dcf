use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use randocube::config::ClientConfig;

use crate::Commands;

#[derive(Parser)]
#[command(name = "rando")]
#[command(about = "Keep track of things to do, and pick a few at random", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to $RANDO_CONFIG, then ./.rando.json)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Store URL for this run only
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the config lives and what it says, after `--url` is applied.
pub(crate) struct Settings {
    pub(crate) config_path: PathBuf,
    pub(crate) config: ClientConfig,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = ClientConfig::resolve_path(cli.config.as_deref());
    let mut config = ClientConfig::load(&config_path)?;
    if let Some(url) = cli.url {
        config.base_url = url;
        config.validate()?;
    }
    let settings = Settings {
        config_path,
        config,
    };

    match cli.command {
        None => {
            randocube::tui::run(randocube::tui::TuiRunOptions {
                base_url: settings.config.base_url,
            })?;
        }
        Some(command) => {
            init_tracing();
            crate::cli_exec::handle_command(&settings, command)?
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RANDO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "randocube=debug,info"
        } else {
            "randocube=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
