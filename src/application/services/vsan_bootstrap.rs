//! Single-host vSAN bootstrap.
//!
//! Split into `prepare` and `apply` so the command layer can show the
//! planned disk group and ask for confirmation between the two.

use anyhow::{Context, Result};

use crate::application::ports::{HostOps, InventoryClient, ProgressReporter};
use crate::domain::error::PreconditionError;
use crate::domain::vsan::{DiskGroupPlan, plan_disk_group};

/// Everything `apply` needs, computed without mutating anything
/// (other than optionally enabling vSAN on the cluster).
#[derive(Debug)]
pub struct BootstrapPlan {
    pub host: String,
    pub disk_group: DiskGroupPlan,
}

/// Validate preconditions and plan the disk group.
///
/// When the cluster does not have vSAN enabled, `enable` decides between
/// enabling it and failing with a precondition error.
///
/// # Errors
///
/// Returns an error if the cluster is missing or vSAN-disabled (without
/// `enable`), if disk enumeration fails, or if no valid disk group can be
/// formed from the host's eligible disks.
pub async fn prepare(
    inventory: &impl InventoryClient,
    ops: &impl HostOps,
    reporter: &impl ProgressReporter,
    cluster: &str,
    host: &str,
    enable: bool,
) -> Result<BootstrapPlan> {
    let vsan_enabled = inventory
        .cluster_vsan_enabled(cluster)
        .await
        .with_context(|| format!("checking vSAN state of cluster '{cluster}'"))?;
    if !vsan_enabled {
        if !enable {
            return Err(PreconditionError::VsanDisabled(cluster.to_string()).into());
        }
        reporter.step(&format!("enabling vSAN on cluster '{cluster}'..."));
        ops.enable_vsan(cluster)
            .await
            .with_context(|| format!("enabling vSAN on cluster '{cluster}'"))?;
        reporter.success("vSAN enabled");
    }

    reporter.step(&format!("enumerating eligible disks on {host}..."));
    let disks = ops
        .eligible_disks(host)
        .await
        .with_context(|| format!("listing eligible disks on '{host}'"))?;
    let disk_group = plan_disk_group(&disks)?;

    Ok(BootstrapPlan {
        host: host.to_string(),
        disk_group,
    })
}

/// Create the planned disk group.
///
/// # Errors
///
/// Returns an error if the claim operation fails at the host.
pub async fn apply(
    ops: &impl HostOps,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<()> {
    let capacity: Vec<String> = plan
        .disk_group
        .capacity
        .iter()
        .map(|d| d.canonical_name.clone())
        .collect();

    reporter.step(&format!(
        "creating disk group on {} (cache {}, {} capacity disks)...",
        plan.host,
        plan.disk_group.cache.canonical_name,
        capacity.len()
    ));
    ops.create_disk_group(&plan.host, &plan.disk_group.cache.canonical_name, &capacity)
        .await
        .with_context(|| format!("creating vSAN disk group on '{}'", plan.host))?;
    reporter.success("vSAN disk group created");
    Ok(())
}
