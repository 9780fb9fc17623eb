//! `vcops guest` — in-guest command execution.

use std::io::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::ports::GuestExec;

/// Guest subcommands.
#[derive(Subcommand)]
pub enum GuestCommand {
    /// Run a command inside a guest OS via guest tools
    Run(RunArgs),
}

/// Arguments for the run command.
#[derive(Args)]
#[command(trailing_var_arg = true)]
pub struct RunArgs {
    /// Virtual machine name
    #[arg(long)]
    pub vm: String,

    /// Guest OS username
    #[arg(long, env = "VCOPS_GUEST_USERNAME")]
    pub guest_username: String,

    /// Guest OS password
    #[arg(long, env = "VCOPS_GUEST_PASSWORD", hide_env_values = true)]
    pub guest_password: String,

    /// Command and arguments to run in the guest
    #[arg(required = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Run a command inside a guest.
///
/// Guest stdout and stderr pass through to ours. A nonzero guest exit
/// status becomes a command failure.
///
/// # Errors
///
/// Returns an error if guest tools are unavailable, credentials are
/// rejected, or the guest command exits nonzero.
pub async fn run(app: &AppContext, cmd: GuestCommand) -> Result<()> {
    match cmd {
        GuestCommand::Run(args) => {
            let govc = app.govc()?;
            govc.preflight().await?;
            let command: Vec<&str> = args.command.iter().map(String::as_str).collect();
            let output = govc
                .guest_run(&args.vm, &args.guest_username, &args.guest_password, &command)
                .await?;

            std::io::stdout()
                .write_all(&output.stdout)
                .context("writing guest stdout")?;
            std::io::stderr()
                .write_all(&output.stderr)
                .context("writing guest stderr")?;
            anyhow::ensure!(
                output.status.success(),
                "guest command exited with {}",
                output.status.code().unwrap_or(1)
            );
            Ok(())
        }
    }
}
