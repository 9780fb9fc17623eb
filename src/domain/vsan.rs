//! vSAN disk-group planning.
//!
//! Pure heuristic over a host's eligible disks — the smallest flash device
//! becomes the cache tier, everything else becomes capacity.

use crate::domain::error::DiskGroupError;

/// One eligible local disk as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskInfo {
    /// Canonical device name, e.g. `naa.55cd2e404c185332`.
    pub canonical_name: String,
    /// Raw capacity in bytes.
    pub size_bytes: u64,
    /// Whether the host reports the device as flash.
    pub ssd: bool,
}

/// A planned disk group: one cache device plus capacity devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskGroupPlan {
    pub cache: DiskInfo,
    pub capacity: Vec<DiskInfo>,
}

/// Plan a disk group from a host's eligible disks.
///
/// The smallest flash device is claimed as the cache tier so the largest
/// devices stay available as capacity. Disk order within the capacity tier
/// follows the input order.
///
/// # Errors
///
/// Returns an error if the host has no flash device or no disk left over
/// for the capacity tier.
pub fn plan_disk_group(disks: &[DiskInfo]) -> Result<DiskGroupPlan, DiskGroupError> {
    let cache = disks
        .iter()
        .filter(|d| d.ssd)
        .min_by_key(|d| d.size_bytes)
        .ok_or(DiskGroupError::NoCacheDisk)?
        .clone();

    let capacity: Vec<DiskInfo> = disks
        .iter()
        .filter(|d| d.canonical_name != cache.canonical_name)
        .cloned()
        .collect();
    if capacity.is_empty() {
        return Err(DiskGroupError::NoCapacityDisks);
    }

    Ok(DiskGroupPlan { cache, capacity })
}

// ── Unit tests ───────────────────────────────────────────────────────────────
