//! Appliance readiness waiting and restart.

use anyhow::{Context, Result};

use crate::application::poll::{self, PollSchedule, Probe};
use crate::application::ports::{ApplianceApi, ProgressReporter};
use crate::domain::appliance::{ApplianceObservation, HealthStatus};

/// Wait until the appliance health endpoint reports ready.
///
/// An unreachable endpoint and a not-yet-green health status both count as
/// "not ready yet". Authentication and API-contract failures from the
/// client come back as `Err` from `observe_health` and end the wait
/// immediately.
///
/// # Errors
///
/// Returns an error on timeout or on a fatal probe failure.
pub async fn wait_ready(
    api: &impl ApplianceApi,
    reporter: &impl ProgressReporter,
    schedule: PollSchedule,
) -> Result<HealthStatus> {
    reporter.step("waiting for appliance health...");
    let status = poll::wait_until("appliance health", schedule, || async {
        match api.observe_health().await {
            Ok(ApplianceObservation::Health(status)) if status.is_ready() => Probe::Ready(status),
            Ok(ApplianceObservation::Health(status)) => {
                Probe::NotReady(format!("health {}", status.as_str()))
            }
            Ok(ApplianceObservation::Unreachable(reason)) => Probe::NotReady(reason),
            Err(err) => Probe::Fatal(err),
        }
    })
    .await?;
    reporter.success(&format!("appliance healthy ({})", status.as_str()));
    Ok(status)
}

/// Request an appliance reboot, then wait for it to come back healthy.
///
/// The wait starts only after the reboot request is accepted; a rejected
/// request fails immediately rather than waiting out the window.
///
/// # Errors
///
/// Returns an error if the reboot request is rejected, or on
/// timeout/fatal failure while waiting for recovery.
pub async fn restart(
    api: &impl ApplianceApi,
    reporter: &impl ProgressReporter,
    schedule: PollSchedule,
) -> Result<HealthStatus> {
    reporter.step("requesting appliance reboot...");
    api.request_reboot("vcops vcsa restart")
        .await
        .context("requesting appliance reboot")?;
    reporter.success("reboot requested");
    wait_ready(api, reporter, schedule).await
}
