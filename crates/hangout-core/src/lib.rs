//! # Hangout Scheduler Core Library
//!
//! Decides which friends are due for a hangout, what to do together, and on
//! which day, without double-booking any day or overrunning the user's
//! weekly hangout target. The `hangout` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Engine**: urgency model, activity suggester, priority scorer, greedy
//!   date allocator, and the orchestrator that ties them together. Pure with
//!   respect to stored data; every call starts from a fresh snapshot.
//! - **Model**: contacts, hangout labels, and scheduling settings.
//! - **Storage**: JSON-file repositories, backup/export/import, and the
//!   TOML tool configuration.
//!
//! ## Key Components
//!
//! - [`RecommendationEngine`]: the generation pipeline
//! - [`Store`]: contact, label, and settings persistence
//! - [`Config`]: tool configuration management

pub mod engine;
pub mod error;
pub mod model;
pub mod storage;

pub use engine::{
    generate_recommendations, update_last_contact, ReasonKind, Recommendation,
    RecommendationEngine,
};
pub use error::{BackupError, ConfigError, CoreError, StorageError, ValidationError};
pub use model::{Contact, ContactPatch, HangoutLabel, LabelPatch, SchedulingSettings, SettingsPatch};
pub use storage::{Config, Snapshot, Store};
