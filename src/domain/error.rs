//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. The taxonomy: precondition
//! failures, validation failures on collected data, and deadline timeouts.
//! Remote-call failures are wrapped with `anyhow::Context` at the call
//! site instead of being enumerated here.

use thiserror::Error;

// ── Lookup / validation errors ───────────────────────────────────────────────

/// Errors resolving inventory objects by name or pattern.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No {kind} matches '{pattern}'.")]
    NoMatch { kind: &'static str, pattern: String },

    #[error("Pattern '{pattern}' matches {} {kind}s: {}. Narrow the pattern.", matches.len(), matches.join(", "))]
    Ambiguous {
        kind: &'static str,
        pattern: String,
        matches: Vec<String>,
    },

    #[error("{kind} '{name}' not found.")]
    NotFound { kind: &'static str, name: String },
}

// ── Precondition errors ──────────────────────────────────────────────────────

/// Target object exists but is not in the state the operation requires.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("Cluster '{0}' does not have vSAN enabled. Pass --enable to turn it on first.")]
    VsanDisabled(String),

    #[error("Adapter '{nic}' is not an uplink of switch '{switch}' (uplinks: {}).", if uplinks.is_empty() { "none".to_string() } else { uplinks.join(", ") })]
    AdapterNotOnSwitch {
        nic: String,
        switch: String,
        uplinks: Vec<String>,
    },

    #[error("NTP server list is empty. Provide at least one server.")]
    NoNtpServers,
}

// ── vSAN planning errors ─────────────────────────────────────────────────────

/// Errors planning a vSAN disk group from a host's eligible disks.
#[derive(Debug, Error)]
pub enum DiskGroupError {
    #[error("Host has no eligible flash device for the cache tier.")]
    NoCacheDisk,

    #[error("Host has no eligible capacity disks (need at least one besides the cache device).")]
    NoCapacityDisks,
}

// ── Deadline poller ──────────────────────────────────────────────────────────

/// The only failure the deadline poller raises itself.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("Timed out after {waited_secs}s waiting for {what}. Last status: {last}")]
    DeadlineExceeded {
        what: String,
        waited_secs: u64,
        last: String,
    },
}

// ── Network config errors ────────────────────────────────────────────────────

/// Errors converting dotted subnet masks.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Subnet mask {0} is not contiguous.")]
    NonContiguous(std::net::Ipv4Addr),
}

// ── Config errors ────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
