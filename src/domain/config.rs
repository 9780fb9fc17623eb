//! Domain types and validators for vcops configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "connection.server",
    "connection.username",
    "connection.insecure",
    "connection.datacenter",
    "poll.interval_secs",
    "poll.timeout_secs",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.vcops/config.yaml`.
///
/// Holds connection defaults and poll tuning. Passwords are never written
/// here — they come from `VCOPS_PASSWORD` or the `--password` flag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VcopsConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

/// Default endpoint settings, overridable by flags and env.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConnectionConfig {
    /// SDK endpoint URL, e.g. `https://vcenter.lab.local/sdk`.
    pub server: Option<String>,
    /// Username for the endpoint.
    pub username: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Datacenter for inventory path resolution.
    pub datacenter: Option<String>,
}

/// Deadline poller tuning defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between probe attempts.
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
    /// Maximum seconds to wait before giving up.
    #[serde(default = "default_poll_timeout")]
    pub timeout_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
            timeout_secs: default_poll_timeout(),
        }
    }
}

fn default_poll_interval() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    600
}

impl VcopsConfig {
    /// Read one whitelisted key as a display string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "connection.server" => self.connection.server.clone(),
            "connection.username" => self.connection.username.clone(),
            "connection.insecure" => Some(self.connection.insecure.to_string()),
            "connection.datacenter" => self.connection.datacenter.clone(),
            "poll.interval_secs" => Some(self.poll.interval_secs.to_string()),
            "poll.timeout_secs" => Some(self.poll.timeout_secs.to_string()),
            _ => None,
        }
    }

    /// Set one whitelisted key from a string value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        match key {
            "connection.server" => self.connection.server = Some(value.to_string()),
            "connection.username" => self.connection.username = Some(value.to_string()),
            "connection.datacenter" => self.connection.datacenter = Some(value.to_string()),
            "connection.insecure" => {
                self.connection.insecure = parse_value(key, value, "Valid values: true, false")?;
            }
            "poll.interval_secs" => {
                self.poll.interval_secs =
                    parse_value(key, value, "Value must be a whole number of seconds")?;
            }
            "poll.timeout_secs" => {
                self.poll.timeout_secs =
                    parse_value(key, value, "Value must be a whole number of seconds")?;
            }
            _ => unreachable!("key validated above"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, hint: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: hint.to_string(),
        }
        .into()
    })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
