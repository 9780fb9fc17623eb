//! Unattended media build service tests.

#![allow(clippy::unwrap_used)]

use std::net::Ipv4Addr;

use vcops_cli::application::services::iso_build::{self, IsoSpec};
use vcops_cli::domain::kickstart::{KickstartParams, NetworkSetup};
use vcops_cli::infra::fs::StdFs;

use crate::mocks::{RecordingReporter, SimulatingRunner};

const BOOT_CFG: &str = "bootstate=0\ntitle=Loading ESXi installer\nkernel=/b.b00\nkernelopt=cdromBoot runweasel\nmodules=/jumpstrt.gz\n";

fn kickstart() -> KickstartParams {
    KickstartParams {
        hostname: "esx02.lab.local".to_string(),
        root_password: "Str0ngPass!".to_string(),
        device: "vmnic0".to_string(),
        network: NetworkSetup::Static {
            ip: Ipv4Addr::new(10, 0, 0, 12),
            netmask: Ipv4Addr::new(255, 255, 255, 0),
            gateway: Ipv4Addr::new(10, 0, 0, 1),
            nameservers: vec![Ipv4Addr::new(10, 0, 0, 2)],
        },
    }
}

fn spec(dir: &std::path::Path, sha256: Option<String>) -> IsoSpec {
    IsoSpec {
        source: dir.join("esxi.iso"),
        output: dir.join("esxi-unattended.iso"),
        expected_sha256: sha256,
        kickstart: kickstart(),
    }
}

#[tokio::test]
async fn remasters_media_with_kickstart_and_patched_boot_configs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("esxi.iso"), "fake iso").unwrap();

    let runner = SimulatingRunner::with_seeds(vec![
        ("BOOT.CFG".to_string(), BOOT_CFG.to_string()),
        ("EFI/BOOT/BOOT.CFG".to_string(), BOOT_CFG.to_string()),
    ]);
    let reporter = RecordingReporter::default();

    iso_build::build(&runner, &StdFs, &StdFs, &reporter, &spec(dir.path(), None))
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains(&"-extract".to_string()));
    assert!(calls[1].contains(&"mkisofs".to_string()));
    let output_pos = calls[1].iter().position(|a| a == "-o").unwrap();
    assert!(calls[1][output_pos + 1].ends_with("esxi-unattended.iso"));

    let tree = runner.captured();
    let ks = tree.iter().find(|f| f.starts_with("KS.CFG\n")).unwrap();
    assert!(ks.contains("rootpw Str0ngPass!"), "got: {ks}");
    assert!(ks.contains("--ip=10.0.0.12"), "got: {ks}");

    for name in ["BOOT.CFG\n", "EFI/BOOT/BOOT.CFG\n"] {
        let cfg = tree.iter().find(|f| f.starts_with(name)).unwrap();
        assert!(cfg.contains("ks=cdrom:/KS.CFG"), "got: {cfg}");
        assert!(cfg.contains("cdromBoot runweasel"), "existing options kept");
    }
    assert!(!reporter.has_warning());
}

#[tokio::test]
async fn missing_efi_boot_config_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("esxi.iso"), "fake iso").unwrap();

    let runner = SimulatingRunner::with_seeds(vec![("BOOT.CFG".to_string(), BOOT_CFG.to_string())]);
    let reporter = RecordingReporter::default();

    iso_build::build(&runner, &StdFs, &StdFs, &reporter, &spec(dir.path(), None))
        .await
        .unwrap();

    assert!(reporter.has_warning());
}

#[tokio::test]
async fn non_installer_media_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("esxi.iso"), "fake iso").unwrap();

    // No BOOT.CFG in the extracted tree.
    let runner = SimulatingRunner::default();
    let reporter = RecordingReporter::default();

    let err = iso_build::build(&runner, &StdFs, &StdFs, &reporter, &spec(dir.path(), None))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("installer media"), "got: {err}");
    assert_eq!(runner.calls().len(), 1, "must stop before repacking");
}

#[tokio::test]
async fn checksum_mismatch_fails_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("esxi.iso"), "fake iso").unwrap();

    let runner = SimulatingRunner::default();
    let reporter = RecordingReporter::default();

    let err = iso_build::build(
        &runner,
        &StdFs,
        &StdFs,
        &reporter,
        &spec(dir.path(), Some("0".repeat(64))),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("checksum mismatch"), "got: {err}");
    assert!(runner.calls().is_empty());
}
