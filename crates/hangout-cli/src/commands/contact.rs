//! Contact management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use hangout_core::{Config, Contact, ContactPatch, Store};

use super::{auto_backup, split_list};

#[derive(Subcommand)]
pub enum ContactAction {
    /// Add a contact
    Add {
        /// Display name
        name: String,
        /// Closeness from 1 (distant) to 10 (closest)
        #[arg(long, default_value = "5")]
        closeness: u8,
        /// Last hangout date (YYYY-MM-DD)
        #[arg(long)]
        last: Option<NaiveDate>,
        /// Comma-separated hangout labels
        #[arg(long)]
        prefs: Option<String>,
        /// Lives elsewhere
        #[arg(long)]
        remote: bool,
        /// City or area, for remote contacts
        #[arg(long)]
        location: Option<String>,
    },
    /// List contacts
    List {
        /// Only remote contacts, most recently seen first
        #[arg(long)]
        remote: bool,
    },
    /// Show one contact
    Get {
        id: String,
    },
    /// Update a contact
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        closeness: Option<u8>,
        /// Last hangout date (YYYY-MM-DD)
        #[arg(long)]
        last: Option<NaiveDate>,
        /// Forget the last hangout date
        #[arg(long, conflicts_with = "last")]
        clear_last: bool,
        /// Comma-separated hangout labels (replaces the current list)
        #[arg(long)]
        prefs: Option<String>,
        #[arg(long)]
        remote: Option<bool>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete a contact
    Delete {
        id: String,
    },
    /// Record a hangout
    HungOut {
        id: String,
        /// Hangout date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: ContactAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        ContactAction::Add {
            name,
            closeness,
            last,
            prefs,
            remote,
            location,
        } => {
            let mut contact = Contact::new(name, closeness)
                .with_preferences(prefs.as_deref().map(split_list).unwrap_or_default());
            contact.last_contact = last;
            contact.is_remote = remote;
            contact.location = location;

            let contact = store.add_contact(contact)?;
            auto_backup(&store, config);
            println!("Contact created: {}", contact.id);
            println!("{}", serde_json::to_string_pretty(&contact)?);
        }
        ContactAction::List { remote } => {
            let mut contacts = store.load_contacts();
            if remote {
                contacts.retain(|c| c.is_remote);
                // None sorts before Some, so reverse puts never-seen last.
                contacts.sort_by(|a, b| b.last_contact.cmp(&a.last_contact));
            }
            println!("{}", serde_json::to_string_pretty(&contacts)?);
        }
        ContactAction::Get { id } => match store.find_contact(&id) {
            Some(contact) => println!("{}", serde_json::to_string_pretty(&contact)?),
            None => return Err(format!("contact not found: {id}").into()),
        },
        ContactAction::Update {
            id,
            name,
            closeness,
            last,
            clear_last,
            prefs,
            remote,
            location,
        } => {
            let patch = ContactPatch {
                name,
                closeness,
                last_contact: if clear_last { Some(None) } else { last.map(Some) },
                preferences: prefs.as_deref().map(split_list),
                is_remote: remote,
                location: location.map(Some),
                description: None,
            };
            match store.update_contact(&id, patch)? {
                Some(contact) => {
                    auto_backup(&store, config);
                    println!("{}", serde_json::to_string_pretty(&contact)?);
                }
                None => return Err(format!("contact not found: {id}").into()),
            }
        }
        ContactAction::Delete { id } => {
            if !store.delete_contact(&id)? {
                return Err(format!("contact not found: {id}").into());
            }
            auto_backup(&store, config);
            println!("Contact deleted: {id}");
        }
        ContactAction::HungOut { id, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let contact = store.mark_hung_out(&id, date)?;
            auto_backup(&store, config);
            println!("Recorded hangout with {} on {date}", contact.name);
        }
    }
    Ok(())
}
