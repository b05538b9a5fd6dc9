//! Backup, restore, and data health commands.

use std::path::PathBuf;

use clap::Subcommand;
use hangout_core::storage::backup::export_file_name;
use hangout_core::{Config, Store};

#[derive(Subcommand)]
pub enum DataAction {
    /// Export all data to a JSON snapshot
    Export {
        /// Output file (default: hangout-scheduler-backup-<date>.json)
        path: Option<PathBuf>,
    },
    /// Replace all data with a JSON snapshot
    Import {
        path: PathBuf,
    },
    /// Check stored data for problems
    Validate,
    /// Show storage statistics
    Info,
    /// Take an auto-backup now
    Backup,
    /// Delete all stored data
    Reset {
        /// Required to actually delete
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        DataAction::Export { path } => {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(export_file_name(chrono::Local::now().date_naive()))
            });
            let snapshot = store.export_to(&path)?;
            println!(
                "Exported {} contacts and {} labels to {}",
                snapshot.contacts.len(),
                snapshot.labels.len(),
                path.display()
            );
        }
        DataAction::Import { path } => {
            let snapshot = store.import_from(&path)?;
            println!(
                "Imported {} contacts and {} labels",
                snapshot.contacts.len(),
                snapshot.labels.len()
            );
        }
        DataAction::Validate => {
            let issues = store.validate_data();
            if issues.is_empty() {
                println!("No issues found");
            } else {
                for issue in &issues {
                    println!("{issue}");
                }
                return Err(format!("{} issue(s) found", issues.len()).into());
            }
        }
        DataAction::Info => {
            println!("{}", serde_json::to_string_pretty(&store.info()?)?);
        }
        DataAction::Backup => {
            let kept = store.create_auto_backup(config.backup.max_auto_backups)?;
            println!("Auto-backup saved ({kept} kept)");
        }
        DataAction::Reset { yes } => {
            if !yes {
                return Err("refusing to delete data without --yes".into());
            }
            store.reset()?;
            println!("All data deleted");
        }
    }
    Ok(())
}
