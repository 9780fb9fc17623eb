//! Kickstart rendering and `boot.cfg` patching for unattended ESXi media.
//!
//! Both formats are external contracts: the kickstart syntax and the
//! `boot.cfg` key layout come from the installer and must be edited in
//! place, never restructured. The kickstart template is embedded at
//! compile time.

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

use crate::domain::network::prefix_len;

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Network section of an unattended install.
#[derive(Debug, Clone)]
pub enum NetworkSetup {
    Dhcp,
    Static {
        ip: std::net::Ipv4Addr,
        netmask: std::net::Ipv4Addr,
        gateway: std::net::Ipv4Addr,
        nameservers: Vec<std::net::Ipv4Addr>,
    },
}

/// Parameters rendered into the kickstart file.
#[derive(Debug, Clone)]
pub struct KickstartParams {
    pub hostname: String,
    pub root_password: String,
    pub device: String,
    pub network: NetworkSetup,
}

/// Render the embedded kickstart template with the given parameters.
///
/// # Errors
///
/// Returns an error if the embedded template is missing (build defect) or
/// a static network setup carries a non-contiguous netmask.
pub fn render(params: &KickstartParams) -> Result<String> {
    let tmpl = ASSETS
        .get_file("ks.cfg.tmpl")
        .context("embedded kickstart template missing")?
        .contents_utf8()
        .context("embedded kickstart template is not UTF-8")?;

    let network = match &params.network {
        NetworkSetup::Dhcp => format!(
            "--bootproto=dhcp --device={} --hostname={}",
            params.device, params.hostname
        ),
        NetworkSetup::Static {
            ip,
            netmask,
            gateway,
            nameservers,
        } => {
            // Surface bad masks here rather than at first boot.
            prefix_len(*netmask)?;
            let ns = nameservers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let mut line = format!(
                "--bootproto=static --device={} --ip={ip} --netmask={netmask} --gateway={gateway} --hostname={}",
                params.device, params.hostname
            );
            if !ns.is_empty() {
                line.push_str(&format!(" --nameserver={ns}"));
            }
            line
        }
    };

    Ok(tmpl
        .replace("%ROOTPW%", &params.root_password)
        .replace("%NETWORK%", &network))
}

/// Point the installer's kernel options at a kickstart file.
///
/// Rewrites the `kernelopt=` line of `boot.cfg`, dropping any existing
/// `ks=` token before appending the new one. Everything else in the file
/// is preserved byte for byte, including the trailing newline convention.
///
/// # Errors
///
/// Returns an error if the file has no `kernelopt=` line.
pub fn patch_boot_cfg(contents: &str, ks: &str) -> Result<String> {
    let mut patched = false;
    let mut out: Vec<String> = Vec::new();
    for line in contents.lines() {
        if let Some(opts) = line.strip_prefix("kernelopt=") {
            let mut kept: Vec<&str> = opts
                .split_whitespace()
                .filter(|tok| !tok.starts_with("ks="))
                .collect();
            let ks_tok = format!("ks={ks}");
            kept.push(&ks_tok);
            out.push(format!("kernelopt={}", kept.join(" ")));
            patched = true;
        } else {
            out.push(line.to_string());
        }
    }
    anyhow::ensure!(patched, "boot.cfg has no kernelopt line; not installer media?");
    let mut joined = out.join("\n");
    if contents.ends_with('\n') {
        joined.push('\n');
    }
    Ok(joined)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
