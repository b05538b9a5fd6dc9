//! `config.toml` inspection and editing.
//!
//! Keys are dot paths into the file's tables, e.g. `backup.max_auto_backups`.

use clap::Subcommand;
use hangout_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dot path, e.g. "engine.seed"
        key: String,
    },
    /// Change one value and save
    Set {
        key: String,
        value: String,
    },
    /// Print the whole file
    List,
    /// Overwrite the file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("config key not found: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            let saved = config.get(&key).unwrap_or(value);
            println!("{key} = {saved}");
        }
        ConfigAction::List => print!("{}", toml::to_string_pretty(&Config::load()?)?),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Config reset to defaults");
        }
    }
    Ok(())
}
