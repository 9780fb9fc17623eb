//! vCenter appliance deployment.
//!
//! Patches a vendor deployment template (a fixed external JSON contract)
//! and hands it to the vendor installer CLI. The template is edited in
//! place — fields the operator did not override are preserved exactly.

use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::network::prefix_len;

/// The installer runs a full appliance deployment; give it an hour.
const DEPLOY_TIMEOUT: Duration = Duration::from_secs(3600);

/// Static network settings patched into the template.
#[derive(Debug, Clone)]
pub struct StaticNetwork {
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub dns_servers: Vec<Ipv4Addr>,
}

/// Operator overrides applied to the deployment template.
#[derive(Debug, Clone, Default)]
pub struct DeployOverrides {
    pub appliance_name: Option<String>,
    pub network: Option<StaticNetwork>,
    pub os_password: Option<String>,
    pub sso_password: Option<String>,
}

/// Deployment inputs.
pub struct DeploySpec<'a> {
    /// Path to the vendor deployment template JSON.
    pub template: &'a Path,
    /// The vendor installer binary, e.g. `vcsa-deploy`.
    pub installer: &'a str,
    pub overrides: DeployOverrides,
}

/// Patch operator overrides into a deployment template.
///
/// The template takes a prefix length, not a dotted mask, so the mask is
/// converted (and validated) here.
///
/// # Errors
///
/// Returns an error if the document has no `new_vcsa` section (not a
/// deployment template) or the netmask is not contiguous.
pub fn patch_template(template: &mut Value, overrides: &DeployOverrides) -> Result<()> {
    let new_vcsa = template
        .get_mut("new_vcsa")
        .and_then(Value::as_object_mut)
        .context("template has no 'new_vcsa' section; not a deployment template?")?;

    if let Some(name) = &overrides.appliance_name {
        new_vcsa
            .entry("appliance")
            .or_insert_with(|| Value::Object(serde_json::Map::new()))
            .as_object_mut()
            .context("'new_vcsa.appliance' is not an object")?
            .insert("name".to_string(), Value::String(name.clone()));
    }

    if let Some(net) = &overrides.network {
        let prefix = prefix_len(net.netmask)?;
        let network = new_vcsa
            .entry("network")
            .or_insert_with(|| Value::Object(serde_json::Map::new()))
            .as_object_mut()
            .context("'new_vcsa.network' is not an object")?;
        network.insert("mode".to_string(), Value::String("static".to_string()));
        network.insert("ip".to_string(), Value::String(net.ip.to_string()));
        network.insert("prefix".to_string(), Value::String(prefix.to_string()));
        network.insert("gateway".to_string(), Value::String(net.gateway.to_string()));
        network.insert(
            "dns_servers".to_string(),
            Value::Array(
                net.dns_servers
                    .iter()
                    .map(|d| Value::String(d.to_string()))
                    .collect(),
            ),
        );
    }

    if let Some(pw) = &overrides.os_password {
        set_password(new_vcsa, "os", pw)?;
    }
    if let Some(pw) = &overrides.sso_password {
        set_password(new_vcsa, "sso", pw)?;
    }
    Ok(())
}

fn set_password(new_vcsa: &mut serde_json::Map<String, Value>, section: &str, pw: &str) -> Result<()> {
    new_vcsa
        .entry(section)
        .or_insert_with(|| Value::Object(serde_json::Map::new()))
        .as_object_mut()
        .with_context(|| format!("'new_vcsa.{section}' is not an object"))?
        .insert("password".to_string(), Value::String(pw.to_string()));
    Ok(())
}

/// Deploy a vCenter appliance from a template.
///
/// Reads and patches the template, stages it in a temp directory, and
/// invokes the vendor installer. The installer's own output is the source
/// of truth for deployment progress; on failure its stderr is surfaced.
///
/// # Errors
///
/// Returns an error if the template cannot be read/patched or the
/// installer fails or times out.
pub async fn deploy(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    spec: &DeploySpec<'_>,
) -> Result<()> {
    let raw = fs
        .read_to_string(spec.template)
        .with_context(|| format!("reading template {}", spec.template.display()))?;
    let mut template: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing template {}", spec.template.display()))?;
    patch_template(&mut template, &spec.overrides)?;

    let staging = tempfile::tempdir().context("creating staging directory")?;
    let staged = staging.path().join("vcsa-deploy.json");
    fs.write(
        &staged,
        &serde_json::to_string_pretty(&template).context("serializing patched template")?,
    )
    .context("staging patched template")?;

    reporter.step("running appliance installer (this takes a while)...");
    let staged_str = staged.to_str().context("staging path is not valid UTF-8")?;
    let output = runner
        .run_with_timeout(
            spec.installer,
            &[
                "install",
                staged_str,
                "--accept-eula",
                "--acknowledge-ceip",
                "--no-ssl-certificate-verification",
            ],
            DEPLOY_TIMEOUT,
        )
        .await
        .with_context(|| format!("running {}", spec.installer))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("appliance installer failed.\n{stderr}");
    }
    reporter.success("appliance deployed");
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
