//! `vcops iso` — unattended install media.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::iso_build::{self, IsoSpec};
use crate::domain::kickstart::{KickstartParams, NetworkSetup};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::StdFs;
use crate::output::reporter::TerminalReporter;

/// Media subcommands.
#[derive(Subcommand)]
pub enum IsoCommand {
    /// Remaster a vendor installer ISO with an embedded kickstart
    Build(BuildArgs),
}

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    /// Vendor installer ISO
    pub source: PathBuf,

    /// Output path for the remastered ISO
    #[arg(short, long)]
    pub output: PathBuf,

    /// Expected SHA-256 of the source ISO, verified before extraction
    #[arg(long)]
    pub sha256: Option<String>,

    /// Hostname assigned during install
    #[arg(long)]
    pub hostname: String,

    /// Root password assigned during install
    #[arg(long, env = "VCOPS_ISO_ROOT_PASSWORD", hide_env_values = true)]
    pub root_password: String,

    /// Network device the installer configures
    #[arg(long, default_value = "vmnic0")]
    pub device: String,

    /// Use DHCP instead of static addressing
    #[arg(long, conflicts_with_all = ["ip", "netmask", "gateway", "nameservers"])]
    pub dhcp: bool,

    /// Static IP address
    #[arg(long, requires_all = ["netmask", "gateway"], required_unless_present = "dhcp")]
    pub ip: Option<Ipv4Addr>,

    /// Dotted netmask for --ip
    #[arg(long, requires = "ip")]
    pub netmask: Option<Ipv4Addr>,

    /// Default gateway for --ip
    #[arg(long, requires = "ip")]
    pub gateway: Option<Ipv4Addr>,

    /// Nameserver for --ip (repeatable)
    #[arg(long = "nameserver", requires = "ip")]
    pub nameservers: Vec<Ipv4Addr>,
}

/// Run an iso subcommand.
///
/// # Errors
///
/// Returns an error if the checksum does not match, the ISO tool fails,
/// or the source is not installer media.
pub async fn run(app: &AppContext, cmd: IsoCommand) -> Result<()> {
    match cmd {
        IsoCommand::Build(args) => {
            let reporter = TerminalReporter::new(&app.output);
            let network = match (args.ip, args.netmask, args.gateway) {
                (Some(ip), Some(netmask), Some(gateway)) => NetworkSetup::Static {
                    ip,
                    netmask,
                    gateway,
                    nameservers: args.nameservers.clone(),
                },
                _ => NetworkSetup::Dhcp,
            };
            let spec = IsoSpec {
                source: args.source.clone(),
                output: args.output.clone(),
                expected_sha256: args.sha256.clone(),
                kickstart: KickstartParams {
                    hostname: args.hostname.clone(),
                    root_password: args.root_password.clone(),
                    device: args.device.clone(),
                    network,
                },
            };
            iso_build::build(
                &TokioCommandRunner::default(),
                &StdFs,
                &StdFs,
                &reporter,
                &spec,
            )
            .await
        }
    }
}
