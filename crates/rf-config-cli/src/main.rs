//! rfconfig — slot game config records from the command line
//!
//! Usage:
//!   rfconfig create -i request.json      - Validate and store a new config
//!   rfconfig update --id <id> -i req.json - Replace an existing config
//!   rfconfig get <id>                     - Print one config
//!   rfconfig find <game name>             - Print configs by game name
//!   rfconfig check -i request.json        - Validate only
//!   rfconfig show-config                  - Print validation settings

mod cli;
mod commands;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use rf_game_config::{GameConfigService, GameConfigValidator, JsonFileStore, ValidationConfig};

use crate::cli::Cli;

fn load_config(path: Option<&Path>) -> Result<ValidationConfig> {
    let Some(path) = path else {
        return Ok(ValidationConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    ValidationConfig::from_toml(&text)
        .with_context(|| format!("Invalid config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let store = JsonFileStore::open(&cli.store_dir)
        .await
        .with_context(|| format!("Failed to open store at {}", cli.store_dir.display()))?;
    log::info!("Using store {}", store.dir().display());

    let service = GameConfigService::with_validator(store, GameConfigValidator::new(config));
    let output = commands::execute(&service, cli.command).await?;

    println!("{}", output.render()?);
    if output.is_failure() {
        std::process::exit(1);
    }
    Ok(())
}
