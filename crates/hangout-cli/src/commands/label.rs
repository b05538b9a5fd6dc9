use clap::Subcommand;
use hangout_core::{Config, HangoutLabel, LabelPatch, Store};

use super::auto_backup;

#[derive(Subcommand)]
pub enum LabelAction {
    /// Add a label
    Add {
        name: String,
        /// Display color, e.g. "#3B82F6"
        #[arg(long)]
        color: Option<String>,
    },
    /// List labels
    List,
    /// Rename or recolor a label
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a label
    Delete {
        id: String,
    },
}

pub fn run(action: LabelAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;

    match action {
        LabelAction::Add { name, color } => {
            let label = store.add_label(HangoutLabel::new(name, color))?;
            auto_backup(&store, config);
            println!("{}", serde_json::to_string_pretty(&label)?);
        }
        LabelAction::List => {
            println!("{}", serde_json::to_string_pretty(&store.load_labels())?);
        }
        LabelAction::Update { id, name, color } => {
            let patch = LabelPatch {
                name,
                color: color.map(Some),
            };
            match store.update_label(&id, patch)? {
                Some(label) => {
                    auto_backup(&store, config);
                    println!("{}", serde_json::to_string_pretty(&label)?);
                }
                None => return Err(format!("label not found: {id}").into()),
            }
        }
        LabelAction::Delete { id } => {
            if !store.delete_label(&id)? {
                return Err(format!("label not found: {id}").into());
            }
            auto_backup(&store, config);
            println!("Label deleted: {id}");
        }
    }
    Ok(())
}
