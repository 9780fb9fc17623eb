//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// One-shot vSphere/vSAN/ESXi lifecycle automation
#[derive(Parser)]
#[command(
    name = "vcops",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (the NO_COLOR environment variable also
    /// disables it)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags shared by every remote operation.
///
/// Each value falls back to the config file when neither the flag nor the
/// environment variable is set. The password is never read from the config
/// file.
#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// vCenter/ESXi SDK endpoint, e.g. https://vcenter.lab.local/sdk
    #[arg(long, global = true, env = "VCOPS_SERVER")]
    pub server: Option<String>,

    /// Username for the endpoint
    #[arg(long, global = true, env = "VCOPS_USERNAME")]
    pub username: Option<String>,

    /// Password for the endpoint
    #[arg(long, global = true, env = "VCOPS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification (self-signed endpoints)
    #[arg(short = 'k', long, global = true, env = "VCOPS_INSECURE")]
    pub insecure: bool,

    /// Datacenter to resolve inventory paths against
    #[arg(long, global = true, env = "VCOPS_DATACENTER")]
    pub datacenter: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// vCenter appliance operations
    #[command(subcommand)]
    Vcsa(commands::vcsa::VcsaCommand),

    /// vSAN operations
    #[command(subcommand)]
    Vsan(commands::vsan::VsanCommand),

    /// Datastore operations
    #[command(subcommand)]
    Datastore(commands::datastore::DatastoreCommand),

    /// Host NTP operations
    #[command(subcommand)]
    Ntp(commands::ntp::NtpCommand),

    /// Host networking operations
    #[command(subcommand)]
    Network(commands::network::NetworkCommand),

    /// Unattended install media
    #[command(subcommand)]
    Iso(commands::iso::IsoCommand),

    /// ESXi host operations
    #[command(subcommand)]
    Host(commands::host::HostCommand),

    /// In-guest command execution
    #[command(subcommand)]
    Guest(commands::guest::GuestCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            connection,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            json,
            quiet,
            no_color,
            yes,
            connection,
        })?;

        match command {
            Command::Version => commands::version::run(&app),
            Command::Vcsa(cmd) => commands::vcsa::run(&app, cmd).await,
            Command::Vsan(cmd) => commands::vsan::run(&app, cmd).await,
            Command::Datastore(cmd) => commands::datastore::run(&app, cmd).await,
            Command::Ntp(cmd) => commands::ntp::run(&app, cmd).await,
            Command::Network(cmd) => commands::network::run(&app, cmd).await,
            Command::Iso(cmd) => commands::iso::run(&app, cmd).await,
            Command::Host(cmd) => commands::host::run(&app, cmd).await,
            Command::Guest(cmd) => commands::guest::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, &cmd),
        }
    }
}
