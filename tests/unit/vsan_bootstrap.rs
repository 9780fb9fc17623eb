//! vSAN bootstrap service tests.

#![allow(clippy::unwrap_used)]

use vcops_cli::application::services::vsan_bootstrap;
use vcops_cli::domain::error::{DiskGroupError, PreconditionError};
use vcops_cli::domain::vsan::DiskInfo;

use crate::mocks::{InventoryStub, RecordingHostOps, RecordingReporter};

fn disk(name: &str, gib: u64, ssd: bool) -> DiskInfo {
    DiskInfo {
        canonical_name: name.to_string(),
        size_bytes: gib * 1024 * 1024 * 1024,
        ssd,
    }
}

#[tokio::test]
async fn disabled_cluster_without_enable_flag_is_a_precondition_error() {
    let inventory = InventoryStub::with_vsan(false);
    let ops = RecordingHostOps::default();
    let reporter = RecordingReporter::default();

    let err = vsan_bootstrap::prepare(&inventory, &ops, &reporter, "lab", "esx02", false)
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<PreconditionError>(),
            Some(PreconditionError::VsanDisabled(_))
        ),
        "got {err:?}"
    );
    assert!(ops.calls().is_empty());
}

#[tokio::test]
async fn enable_flag_turns_vsan_on_before_planning() {
    let inventory = InventoryStub::with_vsan(false);
    let ops = RecordingHostOps::with_disks(vec![
        disk("naa.cap1", 800, false),
        disk("naa.cache", 200, true),
        disk("naa.cap2", 800, false),
    ]);
    let reporter = RecordingReporter::default();

    let plan = vsan_bootstrap::prepare(&inventory, &ops, &reporter, "lab", "esx02", true)
        .await
        .unwrap();

    assert_eq!(ops.calls(), vec!["enable_vsan lab"]);
    assert_eq!(plan.disk_group.cache.canonical_name, "naa.cache");
    assert_eq!(plan.disk_group.capacity.len(), 2);
}

#[tokio::test]
async fn smallest_flash_device_becomes_cache() {
    let inventory = InventoryStub::with_vsan(true);
    let ops = RecordingHostOps::with_disks(vec![
        disk("naa.big-ssd", 400, true),
        disk("naa.small-ssd", 100, true),
        disk("naa.hdd", 2000, false),
    ]);
    let reporter = RecordingReporter::default();

    let plan = vsan_bootstrap::prepare(&inventory, &ops, &reporter, "lab", "esx02", false)
        .await
        .unwrap();

    assert_eq!(plan.disk_group.cache.canonical_name, "naa.small-ssd");
    let capacity: Vec<&str> = plan
        .disk_group
        .capacity
        .iter()
        .map(|d| d.canonical_name.as_str())
        .collect();
    assert_eq!(capacity, vec!["naa.big-ssd", "naa.hdd"]);
}

#[tokio::test]
async fn no_flash_device_fails_planning() {
    let inventory = InventoryStub::with_vsan(true);
    let ops = RecordingHostOps::with_disks(vec![disk("naa.hdd", 2000, false)]);
    let reporter = RecordingReporter::default();

    let err = vsan_bootstrap::prepare(&inventory, &ops, &reporter, "lab", "esx02", false)
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<DiskGroupError>(),
            Some(DiskGroupError::NoCacheDisk)
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn apply_claims_the_planned_disks() {
    let inventory = InventoryStub::with_vsan(true);
    let ops = RecordingHostOps::with_disks(vec![
        disk("naa.cache", 200, true),
        disk("naa.cap1", 800, false),
    ]);
    let reporter = RecordingReporter::default();

    let plan = vsan_bootstrap::prepare(&inventory, &ops, &reporter, "lab", "esx02", false)
        .await
        .unwrap();
    vsan_bootstrap::apply(&ops, &reporter, &plan).await.unwrap();

    assert_eq!(
        ops.calls(),
        vec!["create_disk_group esx02 cache=naa.cache capacity=naa.cap1"]
    );
}
