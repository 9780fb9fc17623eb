//! `vcops vsan` — single-host vSAN bootstrap.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::vsan_bootstrap;
use crate::output::reporter::TerminalReporter;

/// vSAN subcommands.
#[derive(Subcommand)]
pub enum VsanCommand {
    /// Claim a host's local disks into a vSAN disk group
    Bootstrap(BootstrapArgs),
}

/// Arguments for the bootstrap command.
#[derive(Args)]
pub struct BootstrapArgs {
    /// Cluster to bootstrap
    #[arg(long)]
    pub cluster: String,

    /// Host whose local disks are claimed
    #[arg(long)]
    pub host: String,

    /// Enable vSAN on the cluster if it is not enabled yet
    #[arg(long)]
    pub enable: bool,
}

/// Run a vsan subcommand.
///
/// # Errors
///
/// Returns an error if preconditions fail or the disk group cannot be
/// created.
pub async fn run(app: &AppContext, cmd: VsanCommand) -> Result<()> {
    match cmd {
        VsanCommand::Bootstrap(args) => bootstrap(app, &args).await,
    }
}

async fn bootstrap(app: &AppContext, args: &BootstrapArgs) -> Result<()> {
    let govc = app.govc()?;
    govc.preflight().await?;
    let reporter = TerminalReporter::new(&app.output);

    let plan =
        vsan_bootstrap::prepare(&govc, &govc, &reporter, &args.cluster, &args.host, args.enable)
            .await?;

    app.output.header("Disk group plan");
    app.output.kv(
        "cache   ",
        &format!(
            "{} ({})",
            plan.disk_group.cache.canonical_name,
            human_size(plan.disk_group.cache.size_bytes)
        ),
    );
    for disk in &plan.disk_group.capacity {
        app.output.kv(
            "capacity",
            &format!("{} ({})", disk.canonical_name, human_size(disk.size_bytes)),
        );
    }

    if !app.confirm("Claim these disks? Their contents will be lost", false)? {
        app.output.info("aborted");
        return Ok(());
    }
    vsan_bootstrap::apply(&govc, &reporter, &plan).await
}

fn human_size(bytes: u64) -> String {
    const GIB: u64 = 1024 * 1024 * 1024;
    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else {
        format!("{} MiB", bytes / (1024 * 1024))
    }
}
