use super::*;

pub(super) fn handle_ping_command(settings: &Settings) -> Result<()> {
    let store = connect(settings)?;
    let msg = store.health()?;
    println!("{} ({})", msg.trim(), store.base_url());
    Ok(())
}

pub(super) fn handle_reload_command(settings: &Settings) -> Result<()> {
    let store = connect(settings)?;
    let msg = store.reload()?;
    println!("{}", msg.trim());
    Ok(())
}

pub(super) fn handle_config_command(settings: &Settings, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            if json {
                print_json(&settings.config, "config")?;
            } else {
                println!("file: {}", settings.config_path.display());
                println!("url: {}", settings.config.base_url);
            }
        }
        ConfigCommands::Set { url } => {
            let mut cfg = randocube::config::ClientConfig::load(&settings.config_path)?;
            cfg.base_url = url.trim().trim_end_matches('/').to_string();
            cfg.save(&settings.config_path)?;
            println!("Store URL set to {}", cfg.base_url);
        }
    }
    Ok(())
}
