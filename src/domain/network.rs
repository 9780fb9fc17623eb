//! Subnet mask arithmetic.
//!
//! Pure functions only — no I/O, no async.

use std::net::Ipv4Addr;

use crate::domain::error::MaskError;

/// Convert a dotted subnet mask to a prefix length.
///
/// Deployment templates take a prefix length while operators usually have a
/// dotted mask at hand. Non-contiguous masks (e.g. `255.0.255.0`) are
/// rejected.
///
/// # Errors
///
/// Returns [`MaskError::NonContiguous`] if the mask's set bits are not a
/// single left-aligned run.
pub fn prefix_len(mask: Ipv4Addr) -> Result<u8, MaskError> {
    let bits = u32::from(mask);
    let ones = bits.leading_ones();
    if bits.checked_shl(ones).unwrap_or(0) != 0 {
        return Err(MaskError::NonContiguous(mask));
    }
    #[allow(clippy::cast_possible_truncation)] // leading_ones of a u32 is <= 32
    Ok(ones as u8)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
