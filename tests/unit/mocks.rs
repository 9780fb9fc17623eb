//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations and output helpers so each test
//! file doesn't have to re-define the same boilerplate.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use vcops_cli::application::ports::{
    ApplianceApi, CommandRunner, HostOps, HostRuntime, InventoryClient, ProgressReporter,
};
use vcops_cli::domain::appliance::ApplianceObservation;
use vcops_cli::domain::vsan::DiskInfo;

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Reporter ─────────────────────────────────────────────────────────────────

/// Records every progress event for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("reporter lock").clone()
    }

    pub fn has_warning(&self) -> bool {
        self.events().iter().any(|e| e.starts_with("warn:"))
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events
            .lock()
            .expect("reporter lock")
            .push(format!("warn: {message}"));
    }
}

// ── Inventory ────────────────────────────────────────────────────────────────

/// Inventory with fixed datastores and a scripted sequence of host
/// runtime answers (one per probe).
pub struct InventoryStub {
    pub datastores: Vec<String>,
    pub vsan_enabled: bool,
    pub runtimes: Mutex<VecDeque<Result<HostRuntime>>>,
}

impl InventoryStub {
    pub fn with_datastores(names: &[&str]) -> Self {
        Self {
            datastores: names.iter().map(ToString::to_string).collect(),
            vsan_enabled: false,
            runtimes: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_runtimes(runtimes: Vec<Result<HostRuntime>>) -> Self {
        Self {
            datastores: Vec::new(),
            vsan_enabled: false,
            runtimes: Mutex::new(runtimes.into()),
        }
    }

    pub fn with_vsan(enabled: bool) -> Self {
        Self {
            datastores: Vec::new(),
            vsan_enabled: enabled,
            runtimes: Mutex::new(VecDeque::new()),
        }
    }
}

impl InventoryClient for InventoryStub {
    async fn datastore_names(&self) -> Result<Vec<String>> {
        Ok(self.datastores.clone())
    }

    async fn host_runtime(&self, _host: &str) -> Result<HostRuntime> {
        self.runtimes
            .lock()
            .expect("runtime lock")
            .pop_front()
            .unwrap_or_else(|| anyhow::bail!("no scripted runtime left"))
    }

    async fn cluster_vsan_enabled(&self, _cluster: &str) -> Result<bool> {
        Ok(self.vsan_enabled)
    }
}

// ── Host operations ──────────────────────────────────────────────────────────

/// Records every mutation; answers uplink and disk queries from fixtures.
#[derive(Default)]
pub struct RecordingHostOps {
    pub uplinks: Vec<String>,
    pub disks: Vec<DiskInfo>,
    calls: Mutex<Vec<String>>,
}

impl RecordingHostOps {
    pub fn with_uplinks(uplinks: &[&str]) -> Self {
        Self {
            uplinks: uplinks.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_disks(disks: Vec<DiskInfo>) -> Self {
        Self {
            disks,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl HostOps for RecordingHostOps {
    async fn rename_datastore(&self, from: &str, to: &str) -> Result<()> {
        self.record(format!("rename {from} -> {to}"));
        Ok(())
    }

    async fn enable_vsan(&self, cluster: &str) -> Result<()> {
        self.record(format!("enable_vsan {cluster}"));
        Ok(())
    }

    async fn eligible_disks(&self, _host: &str) -> Result<Vec<DiskInfo>> {
        Ok(self.disks.clone())
    }

    async fn create_disk_group(&self, host: &str, cache: &str, capacity: &[String]) -> Result<()> {
        self.record(format!(
            "create_disk_group {host} cache={cache} capacity={}",
            capacity.join(",")
        ));
        Ok(())
    }

    async fn set_ntp_servers(&self, host: &str, servers: &[String]) -> Result<()> {
        self.record(format!("set_ntp {host} {}", servers.join(",")));
        Ok(())
    }

    async fn restart_ntpd(&self, host: &str) -> Result<()> {
        self.record(format!("restart_ntpd {host}"));
        Ok(())
    }

    async fn switch_uplinks(&self, _host: &str, _switch: &str) -> Result<Vec<String>> {
        Ok(self.uplinks.clone())
    }

    async fn remove_uplink(&self, host: &str, switch: &str, nic: &str) -> Result<()> {
        self.record(format!("remove_uplink {host} {switch} {nic}"));
        Ok(())
    }

    async fn add_uplink(&self, host: &str, switch: &str, nic: &str) -> Result<()> {
        self.record(format!("add_uplink {host} {switch} {nic}"));
        Ok(())
    }
}

// ── Appliance API ────────────────────────────────────────────────────────────

/// Answers health probes from a scripted sequence.
pub struct ScriptedAppliance {
    observations: Mutex<VecDeque<Result<ApplianceObservation>>>,
    reboots: Mutex<Vec<String>>,
}

impl ScriptedAppliance {
    pub fn new(observations: Vec<Result<ApplianceObservation>>) -> Self {
        Self {
            observations: Mutex::new(observations.into()),
            reboots: Mutex::new(Vec::new()),
        }
    }

    pub fn reboots(&self) -> Vec<String> {
        self.reboots.lock().expect("reboot lock").clone()
    }
}

impl ApplianceApi for ScriptedAppliance {
    async fn observe_health(&self) -> Result<ApplianceObservation> {
        self.observations
            .lock()
            .expect("observation lock")
            .pop_front()
            .unwrap_or_else(|| anyhow::bail!("no scripted observation left"))
    }

    async fn request_reboot(&self, reason: &str) -> Result<()> {
        self.reboots
            .lock()
            .expect("reboot lock")
            .push(reason.to_string());
        Ok(())
    }
}

// ── Command runner ───────────────────────────────────────────────────────────

/// Records invocations and simulates the side effects the services rely
/// on: an `-extract` call materializes `seed_files` under the target
/// directory, a `mkisofs` call snapshots the source tree, and any
/// argument ending in `capture_suffix` has its file content captured
/// before the (temporary) file disappears.
#[derive(Default)]
pub struct SimulatingRunner {
    pub seed_files: Vec<(String, String)>,
    pub capture_suffix: Option<String>,
    calls: Mutex<Vec<Vec<String>>>,
    captured: Mutex<Vec<String>>,
}

impl SimulatingRunner {
    pub fn with_seeds(seed_files: Vec<(String, String)>) -> Self {
        Self {
            seed_files,
            ..Self::default()
        }
    }

    pub fn with_capture(suffix: &str) -> Self {
        Self {
            capture_suffix: Some(suffix.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn captured(&self) -> Vec<String> {
        self.captured.lock().expect("captured lock").clone()
    }
}

impl CommandRunner for SimulatingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, Duration::from_secs(1)).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(ToString::to_string));
        self.calls.lock().expect("calls lock").push(call);

        if args.contains(&"-extract") {
            let target = args.last().expect("extract target");
            for (rel, content) in &self.seed_files {
                let path = std::path::Path::new(target).join(rel);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, content)?;
            }
        }

        if args.contains(&"mkisofs") {
            let tree = args.last().expect("mkisofs source tree");
            let mut captured = self.captured.lock().expect("captured lock");
            snapshot_tree(std::path::Path::new(tree), std::path::Path::new(tree), &mut captured)?;
        }

        if let Some(suffix) = &self.capture_suffix {
            for arg in args {
                if arg.ends_with(suffix.as_str()) {
                    if let Ok(content) = std::fs::read_to_string(arg) {
                        self.captured.lock().expect("captured lock").push(content);
                    }
                }
            }
        }

        Ok(ok_output(b""))
    }
}

/// Store every file under `dir` as `"relpath\ncontent"`.
fn snapshot_tree(
    root: &std::path::Path,
    dir: &std::path::Path,
    captured: &mut Vec<String>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            snapshot_tree(root, &path, captured)?;
        } else {
            let rel = path.strip_prefix(root)?.to_string_lossy().to_string();
            let content = std::fs::read_to_string(&path)?;
            captured.push(format!("{rel}\n{content}"));
        }
    }
    Ok(())
}
