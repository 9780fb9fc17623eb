//! Unattended ESXi install media.
//!
//! Extracts the vendor ISO with `xorriso`, drops in a rendered kickstart,
//! points `boot.cfg` at it, and repacks a bootable image. The media
//! layout (file names, El Torito boot entries) is the vendor's contract.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, FileHasher, LocalFs, ProgressReporter};
use crate::domain::kickstart::{self, KickstartParams};

const ISO_TOOL: &str = "xorriso";
const ISO_STEP_TIMEOUT: Duration = Duration::from_secs(600);

/// Media build inputs.
pub struct IsoSpec {
    /// The vendor installer ISO.
    pub source: PathBuf,
    /// Where to write the remastered ISO.
    pub output: PathBuf,
    /// Optional SHA-256 of the source ISO, verified before extraction.
    pub expected_sha256: Option<String>,
    /// Kickstart parameters rendered into `KS.CFG`.
    pub kickstart: KickstartParams,
}

/// Build unattended install media from a vendor ISO.
///
/// # Errors
///
/// Returns an error if checksum verification fails, the ISO tool is
/// missing or fails, or the media does not look like installer media
/// (no `BOOT.CFG`).
pub async fn build(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    hasher: &impl FileHasher,
    reporter: &impl ProgressReporter,
    spec: &IsoSpec,
) -> Result<()> {
    if let Some(expected) = &spec.expected_sha256 {
        reporter.step("verifying source ISO checksum...");
        let actual = hasher
            .sha256_file(&spec.source)
            .with_context(|| format!("hashing {}", spec.source.display()))?;
        anyhow::ensure!(
            actual.eq_ignore_ascii_case(expected),
            "source ISO checksum mismatch.\nexpected: {expected}\nactual:   {actual}"
        );
        reporter.success("checksum verified");
    }

    let workdir = tempfile::tempdir().context("creating media working directory")?;
    let work = workdir.path();

    reporter.step("extracting installer media...");
    let source = path_str(&spec.source)?;
    let work_str = path_str(work)?;
    let extract = runner
        .run_with_timeout(
            ISO_TOOL,
            &["-osirrox", "on", "-indev", source, "-extract", "/", work_str],
            ISO_STEP_TIMEOUT,
        )
        .await
        .with_context(|| format!("running {ISO_TOOL} (is it installed?)"))?;
    ensure_tool_success(&extract, "extracting installer media")?;
    // Files come out of the ISO read-only.
    fs.make_tree_writable(work)?;

    reporter.step("writing kickstart...");
    let ks = kickstart::render(&spec.kickstart)?;
    fs.write(&work.join("KS.CFG"), &ks).context("writing KS.CFG")?;

    patch_boot_configs(fs, reporter, work)?;

    reporter.step("repacking bootable ISO...");
    let output = path_str(&spec.output)?;
    let repack = runner
        .run_with_timeout(
            ISO_TOOL,
            &[
                "-as",
                "mkisofs",
                "-relaxed-filenames",
                "-J",
                "-R",
                "-o",
                output,
                "-b",
                "ISOLINUX.BIN",
                "-c",
                "BOOT.CAT",
                "-no-emul-boot",
                "-boot-load-size",
                "4",
                "-boot-info-table",
                "-eltorito-alt-boot",
                "-e",
                "EFIBOOT.IMG",
                "-no-emul-boot",
                work_str,
            ],
            ISO_STEP_TIMEOUT,
        )
        .await
        .with_context(|| format!("running {ISO_TOOL}"))?;
    ensure_tool_success(&repack, "repacking ISO")?;

    reporter.success(&format!("unattended media written to {}", spec.output.display()));
    Ok(())
}

/// Patch the BIOS `BOOT.CFG` (required) and the EFI one (present on all
/// recent installer ISOs, but tolerate its absence).
fn patch_boot_configs(fs: &impl LocalFs, reporter: &impl ProgressReporter, work: &Path) -> Result<()> {
    let bios = work.join("BOOT.CFG");
    let contents = fs
        .read_to_string(&bios)
        .context("reading BOOT.CFG; source does not look like installer media")?;
    fs.write(&bios, &kickstart::patch_boot_cfg(&contents, "cdrom:/KS.CFG")?)
        .context("writing BOOT.CFG")?;

    let efi = work.join("EFI").join("BOOT").join("BOOT.CFG");
    match fs.read_to_string(&efi) {
        Ok(contents) => {
            fs.write(&efi, &kickstart::patch_boot_cfg(&contents, "cdrom:/KS.CFG")?)
                .context("writing EFI BOOT.CFG")?;
        }
        Err(_) => reporter.warn("no EFI BOOT.CFG found; media will only kickstart BIOS boots"),
    }
    Ok(())
}

fn ensure_tool_success(output: &Output, what: &str) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{what} failed.\n{stderr}");
    }
    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("path {} is not valid UTF-8", path.display()))
}
