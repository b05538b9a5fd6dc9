pub mod config;
pub mod contact;
pub mod data;
pub mod label;
pub mod recommend;
pub mod settings;

use hangout_core::{Config, Store};

/// Take an auto-backup after a change, if enabled. Failures only warn.
pub fn auto_backup(store: &Store, config: &Config) {
    if !config.backup.auto_backup {
        return;
    }
    if let Err(e) = store.create_auto_backup(config.backup.max_auto_backups) {
        tracing::warn!(error = %e, "auto-backup failed");
    }
}

/// Split a comma-separated flag value into trimmed, non-empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
