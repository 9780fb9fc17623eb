//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`. Every service takes these as
//! explicit handles; there is no ambient "current connection".

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::appliance::ApplianceObservation;
use crate::domain::config::VcopsConfig;
use crate::domain::vsan::DiskInfo;

// ── Value types ──────────────────────────────────────────────────────────────

/// An explicit endpoint handle, resolved once from flags/env/config.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// SDK URL, e.g. `https://vcenter.lab.local/sdk`.
    pub url: String,
    pub username: String,
    pub password: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Datacenter for inventory path resolution, when set.
    pub datacenter: Option<String>,
}

/// Host runtime as reported by inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntime {
    /// `connected`, `disconnected`, or `notResponding`.
    pub connection_state: String,
    /// `poweredOn`, `poweredOff`, `standBy`, or `unknown`.
    pub power_state: String,
}

impl HostRuntime {
    /// Whether the host is fully up from the management plane's view.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.connection_state == "connected" && self.power_state == "poweredOn"
    }
}

// ── Process execution ────────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output, using the instance's default
    /// timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout the child process must be killed, not left
    /// orphaned.
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Inventory and host operations ────────────────────────────────────────────

/// Read-only inventory lookups against the management endpoint.
#[allow(async_fn_in_trait)]
pub trait InventoryClient {
    /// Names of all datastores visible at the endpoint.
    async fn datastore_names(&self) -> Result<Vec<String>>;

    /// Runtime state of one host.
    async fn host_runtime(&self, host: &str) -> Result<HostRuntime>;

    /// Whether the named cluster has vSAN enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster does not exist.
    async fn cluster_vsan_enabled(&self, cluster: &str) -> Result<bool>;
}

/// Mutating host and cluster operations.
#[allow(async_fn_in_trait)]
pub trait HostOps {
    /// Rename a datastore (exact current name, already resolved).
    async fn rename_datastore(&self, from: &str, to: &str) -> Result<()>;

    /// Enable vSAN on a cluster.
    async fn enable_vsan(&self, cluster: &str) -> Result<()>;

    /// List a host's local disks eligible for vSAN claiming.
    async fn eligible_disks(&self, host: &str) -> Result<Vec<DiskInfo>>;

    /// Create a vSAN disk group from a cache device and capacity devices.
    async fn create_disk_group(&self, host: &str, cache: &str, capacity: &[String]) -> Result<()>;

    /// Replace a host's NTP server list.
    async fn set_ntp_servers(&self, host: &str, servers: &[String]) -> Result<()>;

    /// Enable the ntpd service and restart it.
    async fn restart_ntpd(&self, host: &str) -> Result<()>;

    /// Uplinks of a standard virtual switch on a host.
    async fn switch_uplinks(&self, host: &str, switch: &str) -> Result<Vec<String>>;

    /// Detach a physical adapter from a switch.
    async fn remove_uplink(&self, host: &str, switch: &str, nic: &str) -> Result<()>;

    /// Attach a physical adapter to a switch.
    async fn add_uplink(&self, host: &str, switch: &str, nic: &str) -> Result<()>;
}

/// Remote-command execution inside guest operating systems.
#[allow(async_fn_in_trait)]
pub trait GuestExec {
    /// Run a command in a guest and capture its output.
    async fn guest_run(
        &self,
        vm: &str,
        guest_user: &str,
        guest_password: &str,
        command: &[&str],
    ) -> Result<Output>;
}

// ── Appliance API ────────────────────────────────────────────────────────────

/// The appliance's CIS management API.
///
/// `observe_health` distinguishes "could not reach the endpoint" (an
/// observation — the appliance may simply be booting) from genuine
/// failures: authentication and API-contract errors come back as `Err`
/// and must never be retried by callers.
#[allow(async_fn_in_trait)]
pub trait ApplianceApi {
    /// Probe the system health endpoint once.
    async fn observe_health(&self) -> Result<ApplianceObservation>;

    /// Ask the appliance to reboot.
    async fn request_reboot(&self, reason: &str) -> Result<()>;
}

// ── Progress reporting ───────────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config and filesystem ────────────────────────────────────────────────────

/// Abstracts config persistence (load/save).
pub trait ConfigStore {
    /// Load the config, returning defaults if no file exists.
    fn load(&self) -> Result<VcopsConfig>;
    /// Persist the config.
    fn save(&self, config: &VcopsConfig) -> Result<()>;
    /// Path of the backing file.
    fn path(&self) -> Result<std::path::PathBuf>;
}

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hash of a file as lowercase hex.
    fn sha256_file(&self, path: &std::path::Path) -> Result<String>;
}

/// Abstracts local filesystem access used by media building and template
/// staging.
pub trait LocalFs {
    fn read_to_string(&self, path: &std::path::Path) -> Result<String>;
    fn write(&self, path: &std::path::Path, contents: &str) -> Result<()>;
    fn create_dir_all(&self, path: &std::path::Path) -> Result<()>;
    /// Make every file under `path` writable (ISO extraction yields
    /// read-only trees).
    fn make_tree_writable(&self, path: &std::path::Path) -> Result<()>;
}
