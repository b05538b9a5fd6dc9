//! Contacts, hangout labels, and scheduling settings.
//!
//! JSON field names follow the snapshot format written by earlier versions of
//! the app (`friends`, `lastHangout`, `hangoutPreferences`, ...), so old
//! backups import without conversion.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest allowed closeness rating.
pub const MIN_CLOSENESS: u8 = 1;
/// Highest allowed closeness rating.
pub const MAX_CLOSENESS: u8 = 10;

/// A person the user wants to keep in touch with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Relationship strength, 1 (distant) to 10 (closest).
    pub closeness: u8,
    /// Date of the last hangout. `None` means never.
    #[serde(rename = "lastHangout", default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
    /// Label names, in the order the user picked them.
    #[serde(rename = "hangoutPreferences", default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connection_preferences: Vec<String>,
}

impl Contact {
    /// Create a contact with a fresh id and no history.
    pub fn new(name: impl Into<String>, closeness: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            closeness,
            last_contact: None,
            preferences: Vec::new(),
            is_remote: false,
            location: None,
            description: None,
            birthday: None,
            connection_preferences: Vec::new(),
        }
    }

    pub fn with_last_contact(mut self, date: NaiveDate) -> Self {
        self.last_contact = Some(date);
        self
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if !(MIN_CLOSENESS..=MAX_CLOSENESS).contains(&self.closeness) {
            return Err(ValidationError::InvalidCloseness(self.closeness));
        }
        Ok(())
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(closeness) = patch.closeness {
            self.closeness = closeness;
        }
        if let Some(last_contact) = patch.last_contact {
            self.last_contact = last_contact;
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = preferences;
        }
        if let Some(is_remote) = patch.is_remote {
            self.is_remote = is_remote;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Partial update for a [`Contact`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub closeness: Option<u8>,
    pub last_contact: Option<Option<NaiveDate>>,
    pub preferences: Option<Vec<String>>,
    pub is_remote: Option<bool>,
    pub location: Option<Option<String>>,
    pub description: Option<Option<String>>,
}

/// An activity category. Its name doubles as the key into the activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangoutLabel {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HangoutLabel {
    pub fn new(name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            color,
        }
    }

    /// # Errors
    /// Returns an error when the id or name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }
}

/// Partial update for a [`HangoutLabel`].
#[derive(Debug, Clone, Default)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub color: Option<Option<String>>,
}

/// Labels seeded into an empty store.
pub fn default_labels() -> Vec<HangoutLabel> {
    [
        ("1", "Dining", "#EF4444"),
        ("2", "Coffee", "#8B5CF6"),
        ("3", "Museums", "#10B981"),
        ("4", "Bars", "#F59E0B"),
        ("5", "Neighborhood Walk", "#3B82F6"),
        ("6", "Movies", "#EC4899"),
        ("7", "Shopping", "#6B7280"),
        ("8", "Sports", "#14B8A6"),
    ]
    .into_iter()
    .map(|(id, name, color)| HangoutLabel {
        id: id.to_string(),
        name: name.to_string(),
        color: Some(color.to_string()),
    })
    .collect()
}

/// User scheduling preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingSettings {
    /// How many hangouts per week the user wants.
    pub weekly_hangout_target: u32,
    /// Weekday names ("Friday", "Saturday", ...). Empty means any day.
    #[serde(default)]
    pub preferred_days: Vec<String>,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            weekly_hangout_target: 2,
            preferred_days: vec![
                "Friday".to_string(),
                "Saturday".to_string(),
                "Sunday".to_string(),
            ],
        }
    }
}

impl SchedulingSettings {
    /// Parse `preferred_days` into weekdays, skipping names that don't parse.
    pub fn preferred_weekdays(&self) -> Vec<Weekday> {
        self.preferred_days
            .iter()
            .filter_map(|day| match day.trim().parse::<Weekday>() {
                Ok(weekday) => Some(weekday),
                Err(_) => {
                    tracing::warn!(day = %day, "ignoring unrecognized preferred day");
                    None
                }
            })
            .collect()
    }

    /// # Errors
    /// Returns an error when the weekly target is outside 1..=10.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=10).contains(&self.weekly_hangout_target) {
            return Err(ValidationError::InvalidWeeklyTarget(
                self.weekly_hangout_target,
            ));
        }
        if let Some(bad) = self
            .preferred_days
            .iter()
            .find(|day| day.trim().parse::<Weekday>().is_err())
        {
            return Err(ValidationError::InvalidValue {
                field: "preferredDays".to_string(),
                message: format!("'{bad}' is not a weekday"),
            });
        }
        Ok(())
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(target) = patch.weekly_hangout_target {
            self.weekly_hangout_target = target;
        }
        if let Some(days) = patch.preferred_days {
            self.preferred_days = days;
        }
    }
}

/// Partial update for [`SchedulingSettings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub weekly_hangout_target: Option<u32>,
    pub preferred_days: Option<Vec<String>>,
}
