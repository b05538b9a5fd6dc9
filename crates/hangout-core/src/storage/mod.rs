pub mod backup;
mod config;
mod store;

pub use backup::{AutoBackup, Snapshot, StorageInfo, SNAPSHOT_VERSION};
pub use config::Config;
pub use store::Store;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `HANGOUT_DATA_DIR` wins when set. Otherwise `~/.config/hangout-scheduler/`,
/// or `~/.config/hangout-scheduler-dev/` when `HANGOUT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HANGOUT_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HANGOUT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("hangout-scheduler-dev")
            } else {
                base_dir.join("hangout-scheduler")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
