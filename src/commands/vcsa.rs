//! `vcops vcsa` — vCenter appliance deploy, wait, restart.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::appliance;
use crate::application::services::vcsa_deploy::{
    self, DeployOverrides, DeploySpec, StaticNetwork,
};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::StdFs;
use crate::output::reporter::{Reporter, TerminalReporter};

/// Appliance subcommands.
#[derive(Subcommand)]
pub enum VcsaCommand {
    /// Deploy an appliance from a vendor deployment template
    Deploy(DeployArgs),
    /// Wait until the appliance health endpoint reports ready
    Wait(WaitArgs),
    /// Reboot the appliance and wait for it to come back
    Restart(WaitArgs),
}

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Deployment template JSON
    pub template: PathBuf,

    /// Vendor installer binary
    #[arg(long, default_value = "vcsa-deploy")]
    pub installer: String,

    /// Appliance VM name override
    #[arg(long)]
    pub name: Option<String>,

    /// Static IP address (switches the template to static networking)
    #[arg(long, requires_all = ["netmask", "gateway"])]
    pub ip: Option<Ipv4Addr>,

    /// Dotted netmask for --ip
    #[arg(long, requires = "ip")]
    pub netmask: Option<Ipv4Addr>,

    /// Default gateway for --ip
    #[arg(long, requires = "ip")]
    pub gateway: Option<Ipv4Addr>,

    /// DNS server for --ip (repeatable)
    #[arg(long = "dns", requires = "ip")]
    pub dns_servers: Vec<Ipv4Addr>,

    /// Appliance OS root password override
    #[arg(long, env = "VCOPS_VCSA_OS_PASSWORD", hide_env_values = true)]
    pub os_password: Option<String>,

    /// SSO administrator password override
    #[arg(long, env = "VCOPS_VCSA_SSO_PASSWORD", hide_env_values = true)]
    pub sso_password: Option<String>,

    /// Wait for the deployed appliance to report healthy
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Arguments for wait and restart.
#[derive(Args)]
pub struct WaitArgs {
    #[command(flatten)]
    pub poll: PollArgs,
}

/// Poll tuning flags shared by waiting commands.
#[derive(Args)]
pub struct PollArgs {
    /// Seconds between probes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds to wait before giving up
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Run a vcsa subcommand.
///
/// # Errors
///
/// Returns an error if the operation fails.
pub async fn run(app: &AppContext, cmd: VcsaCommand) -> Result<()> {
    match cmd {
        VcsaCommand::Deploy(args) => deploy(app, &args).await,
        VcsaCommand::Wait(args) => wait(app, &args).await,
        VcsaCommand::Restart(args) => restart(app, &args).await,
    }
}

async fn deploy(app: &AppContext, args: &DeployArgs) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let network = match (args.ip, args.netmask, args.gateway) {
        (Some(ip), Some(netmask), Some(gateway)) => Some(StaticNetwork {
            ip,
            netmask,
            gateway,
            dns_servers: args.dns_servers.clone(),
        }),
        // clap `requires` guarantees all-or-nothing.
        _ => None,
    };
    let spec = DeploySpec {
        template: &args.template,
        installer: &args.installer,
        overrides: DeployOverrides {
            appliance_name: args.name.clone(),
            network,
            os_password: args.os_password.clone(),
            sso_password: args.sso_password.clone(),
        },
    };
    vcsa_deploy::deploy(&TokioCommandRunner::default(), &StdFs, &reporter, &spec).await?;

    if args.wait {
        let schedule = app.poll_schedule(args.poll.interval, args.poll.timeout);
        let status = appliance::wait_ready(&app.cis()?, &reporter, schedule).await?;
        app.output
            .success(&format!("appliance ready (health {})", status.as_str()));
    }
    Ok(())
}

async fn wait(app: &AppContext, args: &WaitArgs) -> Result<()> {
    let reporter = Reporter::for_wait(&app.output, "waiting for appliance...");
    let schedule = app.poll_schedule(args.poll.interval, args.poll.timeout);
    let status = appliance::wait_ready(&app.cis()?, &reporter, schedule).await?;
    if app.is_json() {
        println!(
            "{}",
            serde_json::json!({ "ready": true, "health": status.as_str() })
        );
    } else {
        app.output
            .success(&format!("appliance ready (health {})", status.as_str()));
    }
    Ok(())
}

async fn restart(app: &AppContext, args: &WaitArgs) -> Result<()> {
    if !app.confirm("Reboot the appliance now?", false)? {
        app.output.info("aborted");
        return Ok(());
    }
    let reporter = TerminalReporter::new(&app.output);
    let schedule = app.poll_schedule(args.poll.interval, args.poll.timeout);
    let status = appliance::restart(&app.cis()?, &reporter, schedule).await?;
    app.output
        .success(&format!("appliance back up (health {})", status.as_str()));
    Ok(())
}
