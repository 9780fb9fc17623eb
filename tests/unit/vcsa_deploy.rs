//! Appliance deployment service tests.

#![allow(clippy::unwrap_used)]

use vcops_cli::application::services::vcsa_deploy::{self, DeployOverrides, DeploySpec};
use vcops_cli::infra::fs::StdFs;

use crate::mocks::{RecordingReporter, SimulatingRunner};

const TEMPLATE: &str = r#"{
  "__version": "2.13.0",
  "new_vcsa": {
    "appliance": { "name": "vcsa", "deployment_option": "small" },
    "network": { "mode": "dhcp" },
    "os": { "password": "" },
    "sso": { "password": "" }
  }
}"#;

#[tokio::test]
async fn stages_patched_template_and_runs_installer() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("embedded_vCSA_on_ESXi.json");
    std::fs::write(&template_path, TEMPLATE).unwrap();

    let runner = SimulatingRunner::with_capture("vcsa-deploy.json");
    let reporter = RecordingReporter::default();
    let spec = DeploySpec {
        template: &template_path,
        installer: "vcsa-deploy",
        overrides: DeployOverrides {
            appliance_name: Some("vcsa-lab".to_string()),
            ..DeployOverrides::default()
        },
    };

    vcsa_deploy::deploy(&runner, &StdFs, &reporter, &spec)
        .await
        .unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], "vcsa-deploy");
    assert_eq!(calls[0][1], "install");
    assert!(calls[0].contains(&"--accept-eula".to_string()));
    assert!(calls[0].contains(&"--no-ssl-certificate-verification".to_string()));

    // The installer saw the patched copy, not the original.
    let staged: serde_json::Value = serde_json::from_str(&runner.captured()[0]).unwrap();
    assert_eq!(staged["new_vcsa"]["appliance"]["name"], "vcsa-lab");
    assert_eq!(staged["new_vcsa"]["appliance"]["deployment_option"], "small");

    // And the original on disk is untouched.
    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&template_path).unwrap()).unwrap();
    assert_eq!(original["new_vcsa"]["appliance"]["name"], "vcsa");
}

#[tokio::test]
async fn unreadable_template_fails_before_running_installer() {
    let runner = SimulatingRunner::default();
    let reporter = RecordingReporter::default();
    let missing = std::path::Path::new("/nonexistent/template.json");
    let spec = DeploySpec {
        template: missing,
        installer: "vcsa-deploy",
        overrides: DeployOverrides::default(),
    };

    let err = vcsa_deploy::deploy(&runner, &StdFs, &reporter, &spec)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("reading template"), "got: {err}");
    assert!(runner.calls().is_empty());
}
