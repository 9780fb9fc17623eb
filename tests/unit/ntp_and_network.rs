//! NTP configuration and uplink migration service tests.

#![allow(clippy::unwrap_used)]

use vcops_cli::application::services::{network_migrate, ntp};
use vcops_cli::domain::error::PreconditionError;

use crate::mocks::{RecordingHostOps, RecordingReporter};

#[tokio::test]
async fn ntp_sets_servers_then_restarts_daemon() {
    let ops = RecordingHostOps::default();
    let reporter = RecordingReporter::default();
    let servers = vec!["10.0.0.2".to_string(), "pool.ntp.org".to_string()];

    ntp::set_servers(&ops, &reporter, "esx02.lab.local", &servers)
        .await
        .unwrap();

    assert_eq!(
        ops.calls(),
        vec![
            "set_ntp esx02.lab.local 10.0.0.2,pool.ntp.org",
            "restart_ntpd esx02.lab.local",
        ]
    );
}

#[tokio::test]
async fn ntp_rejects_empty_server_list() {
    let ops = RecordingHostOps::default();
    let reporter = RecordingReporter::default();

    let err = ntp::set_servers(&ops, &reporter, "esx02.lab.local", &[])
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<PreconditionError>(),
            Some(PreconditionError::NoNtpServers)
        ),
        "got {err:?}"
    );
    assert!(ops.calls().is_empty());
}

#[tokio::test]
async fn migrate_removes_then_adds() {
    let ops = RecordingHostOps::with_uplinks(&["vmnic0", "vmnic1"]);
    let reporter = RecordingReporter::default();

    network_migrate::migrate(&ops, &reporter, "esx02", "vmnic1", "vSwitch0", "vSwitch1")
        .await
        .unwrap();

    assert_eq!(
        ops.calls(),
        vec![
            "remove_uplink esx02 vSwitch0 vmnic1",
            "add_uplink esx02 vSwitch1 vmnic1",
        ]
    );
}

#[tokio::test]
async fn migrate_fails_before_mutating_when_nic_absent() {
    let ops = RecordingHostOps::with_uplinks(&["vmnic0"]);
    let reporter = RecordingReporter::default();

    let err = network_migrate::migrate(&ops, &reporter, "esx02", "vmnic9", "vSwitch0", "vSwitch1")
        .await
        .unwrap_err();

    // The error carries the actual uplink list for the operator.
    assert!(err.to_string().contains("vmnic0"), "got: {err}");
    assert!(ops.calls().is_empty(), "nothing may be detached");
}
