//! JSON-file repositories for contacts, labels, and settings.
//!
//! Each collection lives in its own file under the store root. Missing files
//! load as defaults; unreadable ones load as defaults with a warning.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::engine::update_last_contact;
use crate::error::{Result, StorageError};
use crate::model::{
    default_labels, Contact, ContactPatch, HangoutLabel, LabelPatch, SchedulingSettings,
    SettingsPatch,
};

pub(crate) const CONTACTS_FILE: &str = "contacts.json";
pub(crate) const LABELS_FILE: &str = "labels.json";
pub(crate) const SETTINGS_FILE: &str = "settings.json";
pub(crate) const AUTO_BACKUPS_FILE: &str = "auto-backups.json";
pub(crate) const PRE_IMPORT_BACKUP_FILE: &str = "pre-import-backup.json";

/// File-backed store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self> {
        Ok(Self { root: data_dir()? })
    }

    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| StorageError::DataDirUnavailable(format!("{}: {e}", root.display())))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn read_or<T, F>(&self, file: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.root.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return default(),
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable data file, using defaults");
                default()
            }
        }
    }

    pub(crate) fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.root.join(file);
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, content).map_err(|source| StorageError::WriteFailed { path, source })?;
        Ok(())
    }

    pub(crate) fn remove(&self, file: &str) -> Result<()> {
        match std::fs::remove_file(self.root.join(file)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // === Contacts ===

    pub fn load_contacts(&self) -> Vec<Contact> {
        self.read_or(CONTACTS_FILE, Vec::new)
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_contacts(&self, contacts: &[Contact]) -> Result<()> {
        self.write(CONTACTS_FILE, contacts)
    }

    pub fn find_contact(&self, id: &str) -> Option<Contact> {
        self.load_contacts().into_iter().find(|c| c.id == id)
    }

    /// Add a contact. A blank id is replaced with a fresh one.
    ///
    /// # Errors
    /// Returns a validation error for bad closeness or a blank name.
    pub fn add_contact(&self, mut contact: Contact) -> Result<Contact> {
        if contact.id.trim().is_empty() {
            contact.id = uuid::Uuid::new_v4().to_string();
        }
        contact.validate()?;

        let mut contacts = self.load_contacts();
        contacts.push(contact.clone());
        self.save_contacts(&contacts)?;
        tracing::info!(id = %contact.id, name = %contact.name, "added contact");
        Ok(contact)
    }

    /// Apply a patch to a stored contact. Returns `None` for an unknown id.
    ///
    /// # Errors
    /// Returns a validation error if the patched contact is invalid.
    pub fn update_contact(&self, id: &str, patch: ContactPatch) -> Result<Option<Contact>> {
        let mut contacts = self.load_contacts();
        let Some(contact) = contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        let mut updated = contact.clone();
        updated.apply(patch);
        updated.validate()?;
        *contact = updated.clone();

        self.save_contacts(&contacts)?;
        Ok(Some(updated))
    }

    /// Returns `false` when no contact had that id.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn delete_contact(&self, id: &str) -> Result<bool> {
        let contacts = self.load_contacts();
        let before = contacts.len();
        let remaining: Vec<_> = contacts.into_iter().filter(|c| c.id != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        self.save_contacts(&remaining)?;
        Ok(true)
    }

    /// Record a hangout with a contact on `date`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id.
    pub fn mark_hung_out(&self, id: &str, date: NaiveDate) -> Result<Contact> {
        let mut contacts = self.load_contacts();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StorageError::NotFound {
                kind: "contact",
                id: id.to_string(),
            })?;

        *contact = update_last_contact(contact, date);
        let updated = contact.clone();
        self.save_contacts(&contacts)?;
        Ok(updated)
    }

    // === Labels ===

    /// Load labels, seeding the built-in set when none are stored.
    pub fn load_labels(&self) -> Vec<HangoutLabel> {
        let labels: Vec<HangoutLabel> = self.read_or(LABELS_FILE, Vec::new);
        if !labels.is_empty() {
            return labels;
        }

        let defaults = default_labels();
        if let Err(e) = self.save_labels(&defaults) {
            tracing::warn!(error = %e, "failed to persist default labels");
        }
        defaults
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_labels(&self, labels: &[HangoutLabel]) -> Result<()> {
        self.write(LABELS_FILE, labels)
    }

    /// # Errors
    /// Returns a validation error for a blank name.
    pub fn add_label(&self, mut label: HangoutLabel) -> Result<HangoutLabel> {
        if label.id.trim().is_empty() {
            label.id = uuid::Uuid::new_v4().to_string();
        }
        label.validate()?;

        let mut labels = self.load_labels();
        labels.push(label.clone());
        self.save_labels(&labels)?;
        Ok(label)
    }

    /// # Errors
    /// Returns a validation error if the patched label is invalid.
    pub fn update_label(&self, id: &str, patch: LabelPatch) -> Result<Option<HangoutLabel>> {
        let mut labels = self.load_labels();
        let Some(label) = labels.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };

        let mut updated = label.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(color) = patch.color {
            updated.color = color;
        }
        updated.validate()?;
        *label = updated.clone();

        self.save_labels(&labels)?;
        Ok(Some(updated))
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn delete_label(&self, id: &str) -> Result<bool> {
        let labels = self.load_labels();
        let before = labels.len();
        let remaining: Vec<_> = labels.into_iter().filter(|l| l.id != id).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        self.save_labels(&remaining)?;
        Ok(true)
    }

    // === Settings ===

    pub fn load_settings(&self) -> SchedulingSettings {
        self.read_or(SETTINGS_FILE, SchedulingSettings::default)
    }

    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_settings(&self, settings: &SchedulingSettings) -> Result<()> {
        self.write(SETTINGS_FILE, settings)
    }

    /// # Errors
    /// Returns a validation error if the merged settings are invalid.
    pub fn update_settings(&self, patch: SettingsPatch) -> Result<SchedulingSettings> {
        let mut settings = self.load_settings();
        settings.apply(patch);
        settings.validate()?;
        self.save_settings(&settings)?;
        Ok(settings)
    }

    /// Delete every data file in the store.
    ///
    /// # Errors
    /// Returns an error if a file exists but cannot be removed.
    pub fn reset(&self) -> Result<()> {
        for file in [
            CONTACTS_FILE,
            LABELS_FILE,
            SETTINGS_FILE,
            AUTO_BACKUPS_FILE,
            PRE_IMPORT_BACKUP_FILE,
        ] {
            self.remove(file)?;
        }
        tracing::info!(root = %self.root.display(), "reset all data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::at(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn empty_store_loads_defaults() {
        let (_dir, store) = store();
        assert!(store.load_contacts().is_empty());
        assert_eq!(store.load_settings(), SchedulingSettings::default());
        assert_eq!(store.load_labels().len(), 8);
        // defaults were persisted
        assert!(store.root().join(LABELS_FILE).exists());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let (_dir, store) = store();
        std::fs::write(store.root().join(CONTACTS_FILE), "{not json").unwrap();
        assert!(store.load_contacts().is_empty());
    }

    #[test]
    fn contact_crud() {
        let (_dir, store) = store();
        let added = store.add_contact(Contact::new("Ana", 6)).unwrap();
        assert_eq!(store.load_contacts().len(), 1);

        let updated = store
            .update_contact(
                &added.id,
                ContactPatch {
                    name: Some("Ana B".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Ana B");
        assert_eq!(store.find_contact(&added.id).unwrap().name, "Ana B");

        assert!(store.update_contact("missing", ContactPatch::default()).unwrap().is_none());
        assert!(store.delete_contact(&added.id).unwrap());
        assert!(!store.delete_contact(&added.id).unwrap());
        assert!(store.load_contacts().is_empty());
    }

    #[test]
    fn add_contact_rejects_invalid_closeness() {
        let (_dir, store) = store();
        let err = store.add_contact(Contact::new("Bad", 12)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidCloseness(12))
        ));
        assert!(store.load_contacts().is_empty());
    }

    #[test]
    fn update_contact_rejects_invalid_patch() {
        let (_dir, store) = store();
        let added = store.add_contact(Contact::new("Cal", 6)).unwrap();
        let result = store.update_contact(
            &added.id,
            ContactPatch {
                closeness: Some(0),
                ..Default::default()
            },
        );
        assert!(result.is_err());
        assert_eq!(store.find_contact(&added.id).unwrap().closeness, 6);
    }

    #[test]
    fn mark_hung_out_persists_date() {
        let (_dir, store) = store();
        let added = store.add_contact(Contact::new("Dee", 6)).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let updated = store.mark_hung_out(&added.id, date).unwrap();
        assert_eq!(updated.last_contact, Some(date));
        assert_eq!(store.find_contact(&added.id).unwrap().last_contact, Some(date));
        assert!(store.mark_hung_out("nope", date).is_err());
    }

    #[test]
    fn label_crud() {
        let (_dir, store) = store();
        let label = store
            .add_label(HangoutLabel::new("Board Games", Some("#000000".into())))
            .unwrap();
        assert_eq!(store.load_labels().len(), 9);

        let renamed = store
            .update_label(
                &label.id,
                LabelPatch {
                    name: Some("Tabletop".into()),
                    color: None,
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Tabletop");
        assert_eq!(renamed.color.as_deref(), Some("#000000"));

        assert!(store.delete_label(&label.id).unwrap());
        assert_eq!(store.load_labels().len(), 8);
    }

    #[test]
    fn settings_update_validates() {
        let (_dir, store) = store();
        let settings = store
            .update_settings(SettingsPatch {
                weekly_hangout_target: Some(4),
                preferred_days: Some(vec!["Monday".into()]),
            })
            .unwrap();
        assert_eq!(settings.weekly_hangout_target, 4);
        assert_eq!(store.load_settings(), settings);

        assert!(store
            .update_settings(SettingsPatch {
                weekly_hangout_target: Some(0),
                ..Default::default()
            })
            .is_err());
        assert_eq!(store.load_settings().weekly_hangout_target, 4);
    }

    #[test]
    fn reset_removes_files() {
        let (_dir, store) = store();
        store.add_contact(Contact::new("Eve", 3)).unwrap();
        store.save_settings(&SchedulingSettings::default()).unwrap();
        store.reset().unwrap();
        assert!(!store.root().join(CONTACTS_FILE).exists());
        assert!(!store.root().join(SETTINGS_FILE).exists());
        // reset is fine on an empty store
        store.reset().unwrap();
    }
}
