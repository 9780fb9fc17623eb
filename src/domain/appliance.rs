//! Appliance health domain types.
//!
//! Pure mapping of CIS health strings — no I/O.

/// System health as reported by `GET /api/appliance/health/system`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

impl HealthStatus {
    /// Parse the CIS health string. Unknown values map to `Gray`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "orange" => Self::Orange,
            "red" => Self::Red,
            _ => Self::Gray,
        }
    }

    /// Whether the appliance counts as ready for administrative use.
    ///
    /// Yellow means degraded-but-serving; the management service answers,
    /// so waits treat it as ready.
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Green | Self::Yellow)
    }

    /// The CIS wire string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

/// One observation of the appliance from the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplianceObservation {
    /// The health endpoint answered.
    Health(HealthStatus),
    /// The endpoint could not be reached (booting, restarting, or down).
    Unreachable(String),
}

// ── Unit tests ───────────────────────────────────────────────────────────────
