//! Waiting for an ESXi host to finish booting.

use anyhow::Result;

use crate::application::poll::{self, PollSchedule, Probe};
use crate::application::ports::{InventoryClient, ProgressReporter};

/// Wait until `host` reports connected and powered on in inventory.
///
/// The management endpoint itself is not the thing being waited on here,
/// so inventory errors (bad credentials, unknown host) are fatal; only a
/// runtime state short of connected+poweredOn counts as "not ready yet".
///
/// # Errors
///
/// Returns an error on timeout or on any inventory failure.
pub async fn wait_boot(
    inventory: &impl InventoryClient,
    reporter: &impl ProgressReporter,
    host: &str,
    schedule: PollSchedule,
) -> Result<()> {
    reporter.step(&format!("waiting for {host} to boot..."));
    poll::wait_until(&format!("host '{host}' to boot"), schedule, || async {
        match inventory.host_runtime(host).await {
            Ok(runtime) if runtime.is_up() => Probe::Ready(()),
            Ok(runtime) => Probe::NotReady(format!(
                "{}/{}",
                runtime.connection_state, runtime.power_state
            )),
            Err(err) => Probe::Fatal(err),
        }
    })
    .await?;
    reporter.success(&format!("{host} is up"));
    Ok(())
}
