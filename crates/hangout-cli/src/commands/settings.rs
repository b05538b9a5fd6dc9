use clap::Subcommand;
use hangout_core::{Config, SettingsPatch, Store};

use super::{auto_backup, split_list};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show scheduling settings
    Show,
    /// Set the weekly hangout target (1-10)
    SetTarget {
        target: u32,
    },
    /// Set preferred days, comma-separated (empty string for any day)
    SetDays {
        days: String,
    },
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    let patch = match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.load_settings())?);
            return Ok(());
        }
        SettingsAction::SetTarget { target } => SettingsPatch {
            weekly_hangout_target: Some(target),
            ..Default::default()
        },
        SettingsAction::SetDays { days } => SettingsPatch {
            preferred_days: Some(split_list(&days)),
            ..Default::default()
        },
    };

    let settings = store.update_settings(patch)?;
    auto_backup(&store, config);
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
