//! Config commands

use colored::Colorize;

use crate::config::{Config, DirPref, FileType, ScaffoldConfig, SCAFFOLD_CONFIG_FILE};
use crate::ConfigCommands;

pub async fn handle(action: ConfigCommands) -> Result<(), String> {
    match action {
        ConfigCommands::Init {
            force,
            file_type,
            dir,
        } => init(force, file_type, dir),
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(None).unwrap_or_default();
            match key.as_str() {
                "token" => config.token = Some(value),
                "api_url" => config.api_url = Some(value),
                "default_format" => config.default_format = Some(value),
                _ => return Err(format!("Unknown config key: {}", key)),
            }
            config.save()?;
            println!("Set {} successfully", key);
            Ok(())
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(None).unwrap_or_default();
            let value = match key.as_str() {
                "token" => config.token.map(mask),
                "api_url" => config.api_url,
                "default_format" => config.default_format,
                _ => return Err(format!("Unknown config key: {}", key)),
            };
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
            Ok(())
        }
        ConfigCommands::List => {
            let config = Config::load(None).unwrap_or_default();
            println!(
                "api_url: {}",
                config.api_url.unwrap_or_else(|| "(not set)".into())
            );
            println!(
                "token: {}",
                config.token.map(mask).unwrap_or_else(|| "(not set)".into())
            );
            println!(
                "default_format: {}",
                config.default_format.unwrap_or_else(|| "(not set)".into())
            );
            Ok(())
        }
    }
}

fn init(force: bool, file_type: FileType, dir: DirPref) -> Result<(), String> {
    if force {
        println!(
            "{}",
            "Overwriting the existing config file, if any.".yellow()
        );
    } else if ScaffoldConfig::exists() {
        println!(
            "{}",
            "Config file already exists. Use -f to overwrite.".red()
        );
        return Ok(());
    }

    let config = ScaffoldConfig {
        file_type,
        dir_pref: dir,
    };
    config.save()?;
    println!(
        "{}",
        format!("{} has been created", SCAFFOLD_CONFIG_FILE).green()
    );
    Ok(())
}

fn mask(token: String) -> String {
    format!("{}****", &token[..8.min(token.len())])
}
