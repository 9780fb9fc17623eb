//! Host NTP configuration.

use anyhow::{Context, Result};

use crate::application::ports::{HostOps, ProgressReporter};
use crate::domain::error::PreconditionError;

/// Replace a host's NTP server list, then enable and restart ntpd.
///
/// # Errors
///
/// Returns an error if the server list is empty or either remote step
/// fails. The service restart is not attempted when setting the list
/// fails.
pub async fn set_servers(
    ops: &impl HostOps,
    reporter: &impl ProgressReporter,
    host: &str,
    servers: &[String],
) -> Result<()> {
    if servers.is_empty() {
        return Err(PreconditionError::NoNtpServers.into());
    }

    reporter.step(&format!("setting NTP servers on {host}..."));
    ops.set_ntp_servers(host, servers)
        .await
        .with_context(|| format!("setting NTP servers on '{host}'"))?;

    reporter.step("restarting ntpd...");
    ops.restart_ntpd(host)
        .await
        .with_context(|| format!("restarting ntpd on '{host}'"))?;

    reporter.success(&format!("NTP configured: {}", servers.join(", ")));
    Ok(())
}
