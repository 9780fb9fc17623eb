//! `vcops config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::domain::config::VALID_CONFIG_KEYS;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show a configuration value
    Get {
        /// Configuration key, e.g. connection.server
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
    /// Print the config file path
    Path,
}

/// Run a config subcommand.
///
/// # Errors
///
/// Returns an error if the key is unknown, the value does not parse, or
/// the config file cannot be read or written.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Get { key } => get(app, key),
        ConfigCommand::Set { key, value } => set(app, key, value),
        ConfigCommand::Path => {
            println!("{}", app.config_store.path()?.display());
            Ok(())
        }
    }
}

fn get(app: &AppContext, key: &str) -> Result<()> {
    let config = app.config_store.load()?;
    match config.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => anyhow::bail!(
            "Unknown setting: {key}. Valid keys: {}",
            VALID_CONFIG_KEYS.join(", ")
        ),
    }
}

fn set(app: &AppContext, key: &str, value: &str) -> Result<()> {
    let mut config = app.config_store.load()?;
    config.set(key, value)?;
    app.config_store.save(&config)?;
    app.output.success(&format!("Set {key} = {value}"));
    Ok(())
}
