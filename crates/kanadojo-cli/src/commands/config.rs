use clap::Subcommand;
use kanadojo_core::{Config, ConfigError};

use super::ConfigStore;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "reverse_mode.max_probability")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(store: &ConfigStore, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = store.load()?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = store.load()?;
            config.set(&key, &value)?;
            store.save(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = store.load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            store.save(&Config::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
