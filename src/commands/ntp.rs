//! `vcops ntp` — host NTP configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::ntp;
use crate::output::reporter::TerminalReporter;

/// NTP subcommands.
#[derive(Subcommand)]
pub enum NtpCommand {
    /// Replace a host's NTP server list and restart ntpd
    Set(SetArgs),
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Host to configure
    #[arg(long)]
    pub host: String,

    /// NTP servers, in order of preference
    #[arg(required = true)]
    pub servers: Vec<String>,
}

/// Run an ntp subcommand.
///
/// # Errors
///
/// Returns an error if the server list is empty or the host rejects the
/// configuration.
pub async fn run(app: &AppContext, cmd: NtpCommand) -> Result<()> {
    match cmd {
        NtpCommand::Set(args) => {
            let govc = app.govc()?;
            govc.preflight().await?;
            let reporter = TerminalReporter::new(&app.output);
            ntp::set_servers(&govc, &reporter, &args.host, &args.servers).await
        }
    }
}
