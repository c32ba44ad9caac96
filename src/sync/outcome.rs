//! Terminal states of a reconciliation pass.

use std::fmt;
use std::net::IpAddr;

/// Why a pass ended before any record was examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The connectivity probe failed; the host looks offline.
    Offline,
    /// Every echo endpoint failed; the public IP is unknown.
    IpUnavailable,
    /// The domains manifest could not be read or parsed this pass.
    ManifestUnavailable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Offline => "no network connectivity",
            Self::IpUnavailable => "public IP could not be determined",
            Self::ManifestUnavailable => "domains manifest unavailable",
        };
        f.write_str(reason)
    }
}

/// Record counts from a completed pass.
///
/// Partial success is normal: failed updates are counted here rather than
/// escalated, and the pass still completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    /// The public IP every record was reconciled against.
    pub public_ip: IpAddr,
    /// Records whose content was rewritten (or would have been, in
    /// dry-run mode).
    pub updated: usize,
    /// Records already pointing at the public IP.
    pub unchanged: usize,
    /// Records whose update was attempted and refused.
    pub failed: usize,
}

impl PassSummary {
    /// Creates an empty summary for a pass reconciling against `public_ip`.
    #[must_use]
    pub const fn new(public_ip: IpAddr) -> Self {
        Self {
            public_ip,
            updated: 0,
            unchanged: 0,
            failed: 0,
        }
    }

    /// Total number of records the pass examined.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.updated + self.unchanged + self.failed
    }
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "public IP {}, {} record(s): {} updated, {} unchanged, {} failed",
            self.public_ip,
            self.total(),
            self.updated,
            self.unchanged,
            self.failed
        )
    }
}

/// Terminal state of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass was abandoned before any record work.
    Skipped(SkipReason),
    /// Every resolved record was processed, successfully or not.
    Completed(PassSummary),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip() -> IpAddr {
        "203.0.113.5".parse().unwrap()
    }

    #[test]
    fn summary_starts_at_zero() {
        let summary = PassSummary::new(ip());

        assert_eq!(summary.total(), 0);
        assert_eq!(summary.updated, 0);
        assert_eq!(summary.unchanged, 0);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn summary_display_includes_every_count() {
        let mut summary = PassSummary::new(ip());
        summary.updated = 1;
        summary.unchanged = 2;
        summary.failed = 3;

        let text = summary.to_string();

        assert_eq!(
            text,
            "public IP 203.0.113.5, 6 record(s): 1 updated, 2 unchanged, 3 failed"
        );
    }

    #[test]
    fn skip_reasons_display_as_prose() {
        assert_eq!(SkipReason::Offline.to_string(), "no network connectivity");
        assert_eq!(
            SkipReason::IpUnavailable.to_string(),
            "public IP could not be determined"
        );
        assert_eq!(
            SkipReason::ManifestUnavailable.to_string(),
            "domains manifest unavailable"
        );
    }
}
