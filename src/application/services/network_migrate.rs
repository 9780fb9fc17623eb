//! Moving physical adapters between virtual switches.

use anyhow::{Context, Result};

use crate::application::ports::{HostOps, ProgressReporter};
use crate::domain::error::PreconditionError;

/// Move `nic` from `from_switch` to `to_switch` on `host`.
///
/// The adapter must currently be an uplink of the source switch; the
/// check runs before anything is detached so a typo'd adapter name fails
/// with the actual uplink list instead of half-migrating.
///
/// # Errors
///
/// Returns an error if the precondition fails or either reconfiguration
/// step fails at the endpoint.
pub async fn migrate(
    ops: &impl HostOps,
    reporter: &impl ProgressReporter,
    host: &str,
    nic: &str,
    from_switch: &str,
    to_switch: &str,
) -> Result<()> {
    let uplinks = ops
        .switch_uplinks(host, from_switch)
        .await
        .with_context(|| format!("reading uplinks of '{from_switch}' on '{host}'"))?;
    if !uplinks.iter().any(|u| u == nic) {
        return Err(PreconditionError::AdapterNotOnSwitch {
            nic: nic.to_string(),
            switch: from_switch.to_string(),
            uplinks,
        }
        .into());
    }

    reporter.step(&format!("detaching {nic} from {from_switch}..."));
    ops.remove_uplink(host, from_switch, nic)
        .await
        .with_context(|| format!("removing '{nic}' from '{from_switch}'"))?;

    reporter.step(&format!("attaching {nic} to {to_switch}..."));
    ops.add_uplink(host, to_switch, nic)
        .await
        .with_context(|| format!("adding '{nic}' to '{to_switch}'"))?;

    reporter.success(&format!("{nic} moved to {to_switch}"));
    Ok(())
}
