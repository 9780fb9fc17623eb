//! The deadline poller — bounded readiness waiting.
//!
//! Every wait in this tool goes through [`wait_until`]: appliance health,
//! post-reboot recovery, host boot. The probe reports a tagged outcome so
//! "not ready yet" and "genuinely broken" are never conflated — a `Fatal`
//! outcome propagates immediately instead of burning the timeout window.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::Instant;

use crate::domain::error::WaitError;

/// Outcome of one probe invocation.
pub enum Probe<T> {
    /// The condition holds; the wait returns this payload.
    Ready(T),
    /// Not there yet — retry after the interval. Carries a short status
    /// string surfaced in the timeout error.
    NotReady(String),
    /// Unrecoverable — propagate without retrying.
    Fatal(anyhow::Error),
}

/// Interval and deadline for one wait call.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    /// Spacing between probe attempts.
    pub interval: Duration,
    /// Wall-clock budget, measured from call entry.
    pub timeout: Duration,
}

impl PollSchedule {
    #[must_use]
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    #[must_use]
    pub fn from_secs(interval_secs: u64, timeout_secs: u64) -> Self {
        Self::new(
            Duration::from_secs(interval_secs),
            Duration::from_secs(timeout_secs),
        )
    }
}

/// Repeatedly invoke `probe` until it reports ready or the deadline passes.
///
/// The start instant is captured once at entry; the deadline never moves
/// for the duration of the call. The deadline is checked after every
/// failed probe and again after every sleep, so an always-failing probe
/// terminates within `timeout + interval` and a zero timeout fails after
/// at most one probe invocation. Success counts only strictly before
/// `elapsed >= timeout` — a probe that would first succeed exactly at the
/// deadline is not attempted.
///
/// # Errors
///
/// Returns [`WaitError::DeadlineExceeded`] when the budget runs out, or
/// the probe's own error when it reports a fatal outcome.
pub async fn wait_until<T, F, Fut>(what: &str, schedule: PollSchedule, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Probe<T>>,
{
    let started = Instant::now();
    // Assigned by the NotReady arm before any path reaches the break.
    let mut last;

    loop {
        match probe().await {
            Probe::Ready(value) => return Ok(value),
            Probe::Fatal(err) => return Err(err),
            Probe::NotReady(status) => last = status,
        }

        if started.elapsed() >= schedule.timeout {
            break;
        }
        tokio::time::sleep(schedule.interval).await;
        if started.elapsed() >= schedule.timeout {
            break;
        }
    }

    Err(WaitError::DeadlineExceeded {
        what: what.to_string(),
        waited_secs: started.elapsed().as_secs(),
        last,
    }
    .into())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
