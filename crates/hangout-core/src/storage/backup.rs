//! Export, import, and rolling auto-backups of the whole store.
//!
//! Snapshots are JSON documents with `friends`, `hangoutLabels`, and
//! `settings` sections, plus export metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::store::{Store, AUTO_BACKUPS_FILE, PRE_IMPORT_BACKUP_FILE};
use crate::error::{BackupError, Result};
use crate::model::{Contact, HangoutLabel, SchedulingSettings, MAX_CLOSENESS, MIN_CLOSENESS};

/// Format version written into exported snapshots.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Auto-backups kept when the configuration doesn't say otherwise.
pub const DEFAULT_MAX_AUTO_BACKUPS: usize = 5;

/// A full copy of the user's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(rename = "friends")]
    pub contacts: Vec<Contact>,
    #[serde(rename = "hangoutLabels")]
    pub labels: Vec<HangoutLabel>,
    pub settings: SchedulingSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Snapshot {
    /// Parse snapshot JSON, requiring all three data sections.
    ///
    /// # Errors
    /// Returns `InvalidFormat` when a section is missing or null, or a JSON
    /// error when the sections don't have the expected shape.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        for key in ["friends", "hangoutLabels", "settings"] {
            if value.get(key).map_or(true, serde_json::Value::is_null) {
                return Err(BackupError::InvalidFormat(key).into());
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// One entry in the rolling auto-backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackup {
    #[serde(rename = "friends")]
    pub contacts: Vec<Contact>,
    #[serde(rename = "hangoutLabels")]
    pub labels: Vec<HangoutLabel>,
    pub settings: SchedulingSettings,
    pub timestamp: DateTime<Utc>,
}

/// Summary of what the store holds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub contacts: usize,
    pub labels: usize,
    pub settings: SchedulingSettings,
    /// Size in bytes of the serialized contacts, labels, and settings.
    pub storage_size: usize,
    pub auto_backups: usize,
    pub root: PathBuf,
}

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("hangout-scheduler-backup-{}.json", date.format("%Y-%m-%d"))
}

impl Store {
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            contacts: self.load_contacts(),
            labels: self.load_labels(),
            settings: self.load_settings(),
            export_date: Some(Utc::now()),
            version: Some(SNAPSHOT_VERSION.to_string()),
        }
    }

    /// Write a snapshot to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn export_to(&self, path: &Path) -> Result<Snapshot> {
        let snapshot = self.export_snapshot();
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        tracing::info!(
            path = %path.display(),
            contacts = snapshot.contacts.len(),
            "exported snapshot"
        );
        Ok(snapshot)
    }

    /// Read a snapshot file and replace the stored data with it.
    ///
    /// # Errors
    /// See [`Store::import_snapshot`]; also fails if the file is unreadable
    /// or malformed.
    pub fn import_from(&self, path: &Path) -> Result<Snapshot> {
        let content = std::fs::read_to_string(path).map_err(|source| BackupError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Snapshot::from_json(&content)?;
        self.import_snapshot(&snapshot)?;
        tracing::info!(path = %path.display(), "imported snapshot");
        Ok(snapshot)
    }

    /// Replace all stored data with `snapshot`.
    ///
    /// The current data is saved to the pre-import backup first. If any write
    /// fails, the previous data is restored and `RolledBack` is returned.
    ///
    /// # Errors
    /// Returns an error if the pre-import backup cannot be written, or
    /// `RolledBack` if the import itself failed.
    pub fn import_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let previous = Snapshot {
            export_date: None,
            version: None,
            ..self.export_snapshot()
        };
        self.write(PRE_IMPORT_BACKUP_FILE, &previous)?;

        if let Err(e) = self.write_snapshot(snapshot) {
            tracing::warn!(error = %e, "import failed, rolling back");
            if let Err(restore) = self.write_snapshot(&previous) {
                tracing::warn!(error = %restore, "rollback failed");
            }
            return Err(BackupError::RolledBack(e.to_string()).into());
        }

        for issue in self.validate_data() {
            tracing::warn!(%issue, "imported data has issues");
        }
        Ok(())
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.save_contacts(&snapshot.contacts)?;
        self.save_labels(&snapshot.labels)?;
        self.save_settings(&snapshot.settings)
    }

    pub fn load_auto_backups(&self) -> Vec<AutoBackup> {
        self.read_or(AUTO_BACKUPS_FILE, Vec::new)
    }

    /// Append an auto-backup, dropping the oldest beyond `keep`.
    ///
    /// # Errors
    /// Returns an error if the backup file cannot be written.
    pub fn create_auto_backup(&self, keep: usize) -> Result<usize> {
        let mut backups = self.load_auto_backups();
        backups.push(AutoBackup {
            contacts: self.load_contacts(),
            labels: self.load_labels(),
            settings: self.load_settings(),
            timestamp: Utc::now(),
        });

        if backups.len() > keep {
            let excess = backups.len() - keep;
            backups.drain(..excess);
        }

        self.write(AUTO_BACKUPS_FILE, &backups)?;
        Ok(backups.len())
    }

    /// List problems with the stored data, one line each.
    pub fn validate_data(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (index, contact) in self.load_contacts().iter().enumerate() {
            if contact.id.trim().is_empty() || contact.name.trim().is_empty() {
                issues.push(format!("Friend {index} missing required fields"));
            }
            if !(MIN_CLOSENESS..=MAX_CLOSENESS).contains(&contact.closeness) {
                issues.push(format!(
                    "Friend {} has invalid closeness: {}",
                    contact.name, contact.closeness
                ));
            }
        }

        for (index, label) in self.load_labels().iter().enumerate() {
            if label.validate().is_err() {
                issues.push(format!("Label {index} missing required fields"));
            }
        }

        let settings = self.load_settings();
        if !(1..=10).contains(&settings.weekly_hangout_target) {
            issues.push(format!(
                "Invalid weekly hangout target: {}",
                settings.weekly_hangout_target
            ));
        }

        issues
    }

    /// # Errors
    /// Returns an error if the stored data cannot be serialized.
    pub fn info(&self) -> Result<StorageInfo> {
        let contacts = self.load_contacts();
        let labels = self.load_labels();
        let settings = self.load_settings();
        let storage_size = serde_json::to_vec(&contacts)?.len()
            + serde_json::to_vec(&labels)?.len()
            + serde_json::to_vec(&settings)?.len();

        Ok(StorageInfo {
            contacts: contacts.len(),
            labels: labels.len(),
            settings,
            storage_size,
            auto_backups: self.load_auto_backups().len(),
            root: self.root().to_path_buf(),
        })
    }
}
