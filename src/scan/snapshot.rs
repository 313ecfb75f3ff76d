use crate::scan::{Classification, PlatformScanResult, zero_counts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The complete, timestamped result of one assembly run.
///
/// Created fresh each run and never mutated afterwards; the engine hands it to the snapshot
/// writer and discards it. Platform results are kept in the configured scan order (not keyed by
/// name) so the order survives serialization and runs are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Stamped once at assembly start; all resources in a snapshot share one logical scan time.
    pub scan_timestamp: DateTime<Utc>,
    pub scanner_version: String,
    pub total_resources: u64,
    pub platforms: Vec<PlatformScanResult>,

    /// Global classification counts, summed across platforms. Every label present, zero-filled.
    pub counts: BTreeMap<Classification, u64>,
}

impl InventorySnapshot {
    /// Fold per-platform results into a snapshot, computing the aggregate counts.
    #[must_use]
    pub fn assemble_from(scan_timestamp: DateTime<Utc>, platforms: Vec<PlatformScanResult>) -> Self {
        let counts = platforms.iter().fold(zero_counts(), |mut acc, result| {
            for (classification, count) in &result.counts {
                *acc.entry(*classification).or_default() += count;
            }
            acc
        });

        let total_resources = platforms.iter().map(PlatformScanResult::resource_count).sum();

        Self {
            scan_timestamp,
            scanner_version: env!("CARGO_PKG_VERSION").to_owned(),
            total_resources,
            platforms,
            counts,
        }
    }

    /// The result for one platform, if it was part of this run.
    #[must_use]
    pub fn platform(&self, platform: crate::scan::Platform) -> Option<&PlatformScanResult> {
        self.platforms.iter().find(|r| r.platform == platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Platform, ScanStatus};

    #[test]
    fn test_counts_sum_across_platforms() {
        let mut first = PlatformScanResult::skipped(Platform::GitHub, "x");
        first.status = ScanStatus::Ok;
        *first.counts.get_mut(&Classification::Active).unwrap() = 3;
        *first.counts.get_mut(&Classification::Core).unwrap() = 1;

        let mut second = PlatformScanResult::skipped(Platform::Notion, "x");
        second.status = ScanStatus::Ok;
        *second.counts.get_mut(&Classification::Active).unwrap() = 2;

        let snapshot = InventorySnapshot::assemble_from(Utc::now(), vec![first, second]);

        assert_eq!(snapshot.counts[&Classification::Active], 5);
        assert_eq!(snapshot.counts[&Classification::Core], 1);
        assert_eq!(snapshot.counts[&Classification::Deprecate], 0);
    }

    #[test]
    fn test_platform_lookup() {
        let snapshot = InventorySnapshot::assemble_from(Utc::now(), vec![PlatformScanResult::skipped(Platform::Jira, "no-credential")]);

        assert!(snapshot.platform(Platform::Jira).is_some());
        assert!(snapshot.platform(Platform::GitHub).is_none());
    }
}
