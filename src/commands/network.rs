//! `vcops network` — host networking operations.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::network_migrate;
use crate::output::reporter::TerminalReporter;

/// Networking subcommands.
#[derive(Subcommand)]
pub enum NetworkCommand {
    /// Move a physical adapter from one standard switch to another
    Migrate(MigrateArgs),
}

/// Arguments for the migrate command.
#[derive(Args)]
pub struct MigrateArgs {
    /// Host whose adapter is moved
    #[arg(long)]
    pub host: String,

    /// Physical adapter, e.g. vmnic1
    #[arg(long)]
    pub nic: String,

    /// Switch the adapter currently belongs to
    #[arg(long)]
    pub from: String,

    /// Switch the adapter moves to
    #[arg(long)]
    pub to: String,
}

/// Run a network subcommand.
///
/// # Errors
///
/// Returns an error if the adapter is not on the source switch or either
/// uplink change fails.
pub async fn run(app: &AppContext, cmd: NetworkCommand) -> Result<()> {
    match cmd {
        NetworkCommand::Migrate(args) => {
            let govc = app.govc()?;
            govc.preflight().await?;
            let reporter = TerminalReporter::new(&app.output);
            network_migrate::migrate(
                &govc,
                &reporter,
                &args.host,
                &args.nic,
                &args.from,
                &args.to,
            )
            .await
        }
    }
}
