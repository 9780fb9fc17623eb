//! `vcops datastore` — datastore operations.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::datastore;
use crate::output::reporter::TerminalReporter;

/// Datastore subcommands.
#[derive(Subcommand)]
pub enum DatastoreCommand {
    /// Rename the datastore matching a pattern
    Rename(RenameArgs),
}

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Current name, or a wildcard pattern matching exactly one datastore
    pub pattern: String,

    /// New datastore name
    pub new_name: String,
}

/// Run a datastore subcommand.
///
/// # Errors
///
/// Returns an error if the pattern matches zero or several datastores, or
/// the rename fails.
pub async fn run(app: &AppContext, cmd: DatastoreCommand) -> Result<()> {
    match cmd {
        DatastoreCommand::Rename(args) => {
            let govc = app.govc()?;
            govc.preflight().await?;
            let reporter = TerminalReporter::new(&app.output);
            let previous =
                datastore::rename(&govc, &govc, &reporter, &args.pattern, &args.new_name).await?;
            if app.is_json() {
                println!(
                    "{}",
                    serde_json::json!({ "renamed": previous != args.new_name,
                                        "from": previous, "to": args.new_name })
                );
            }
            Ok(())
        }
    }
}
