//! `vcops host` — ESXi host operations.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::host_wait;
use crate::commands::vcsa::PollArgs;
use crate::output::reporter::Reporter;

/// Host subcommands.
#[derive(Subcommand)]
pub enum HostCommand {
    /// Wait until a host is connected and powered on
    WaitBoot(WaitBootArgs),
}

/// Arguments for the wait-boot command.
#[derive(Args)]
pub struct WaitBootArgs {
    /// Host to wait for
    pub host: String,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Run a host subcommand.
///
/// # Errors
///
/// Returns an error if the deadline expires or the endpoint cannot be
/// queried.
pub async fn run(app: &AppContext, cmd: HostCommand) -> Result<()> {
    match cmd {
        HostCommand::WaitBoot(args) => {
            let govc = app.govc()?;
            govc.preflight().await?;
            let reporter = Reporter::for_wait(&app.output, "waiting for host...");
            let schedule = app.poll_schedule(args.poll.interval, args.poll.timeout);
            host_wait::wait_boot(&govc, &reporter, &args.host, schedule).await
        }
    }
}
