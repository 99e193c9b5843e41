use clap::Subcommand;
use triumph_core::SetbackTypeRegistry;

use super::{open_tracker, print_json, print_mutation, CliResult};

#[derive(Subcommand)]
pub enum TypesAction {
    /// List setback types (built-in first)
    List,
    /// Register a setback type
    Add {
        /// Label to add
        label: String,
    },
    /// Remove a user-added setback type
    Remove {
        /// Label to remove
        label: String,
    },
}

pub fn run(action: TypesAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        TypesAction::List => {
            let listed: Vec<_> = tracker
                .setback_types()
                .list()
                .into_iter()
                .map(|label| {
                    serde_json::json!({
                        "builtin": SetbackTypeRegistry::is_default(&label),
                        "label": label,
                    })
                })
                .collect();
            print_json(&listed)?;
        }
        TypesAction::Add { label } => {
            let event = tracker.add_setback_type_event(&label)?;
            print_mutation(&tracker, &event)?;
        }
        TypesAction::Remove { label } => {
            let event = tracker.remove_setback_type(&label)?;
            print_mutation(&tracker, &event)?;
        }
    }
    Ok(())
}
