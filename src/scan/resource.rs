use crate::scan::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::{Display, EnumIter};

/// Named numeric activity signals attached to a resource.
///
/// A metric that could not be retrieved from the source platform is absent from the map, never
/// zero. Classification treats "unknown" and "zero" differently, so extractors must not fill in
/// defaults for missing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    DaysSinceLastActivity,
    OpenItemCount,
    StarCount,
    ForkCount,
    WatcherCount,
    SizeKb,
    WorkflowCount,
    BranchCount,
    TagCount,
}

/// Named boolean facts about a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    IsFork,
    IsEmpty,
    IsArchived,
    IsPrivate,
    IsDisabled,
    IsDatabase,
}

/// Platform-agnostic view of one scanned item.
///
/// `id` + `platform` together uniquely identify a resource across a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResource {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub metrics: BTreeMap<Metric, u64>,

    #[serde(default)]
    pub flags: BTreeSet<Flag>,

    pub platform: Platform,
}

impl NormalizedResource {
    /// Value of the given metric, or `None` when the source call failed to retrieve it.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<u64> {
        self.metrics.get(&metric).copied()
    }

    #[must_use]
    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Whether the resource carries enough identity for any classification rule to apply.
    #[must_use]
    pub fn is_identifiable(&self) -> bool {
        !self.id.is_empty() || !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> NormalizedResource {
        NormalizedResource {
            id: "acme/widget".into(),
            name: "widget".into(),
            url: None,
            created_at: None,
            updated_at: None,
            metrics: BTreeMap::from([(Metric::StarCount, 12)]),
            flags: BTreeSet::from([Flag::IsFork]),
            platform: Platform::GitHub,
        }
    }

    #[test]
    fn test_metric_lookup() {
        let r = resource();
        assert_eq!(r.metric(Metric::StarCount), Some(12));
        assert_eq!(r.metric(Metric::SizeKb), None);
    }

    #[test]
    fn test_flag_lookup() {
        let r = resource();
        assert!(r.has_flag(Flag::IsFork));
        assert!(!r.has_flag(Flag::IsEmpty));
    }

    #[test]
    fn test_identifiable() {
        let mut r = resource();
        assert!(r.is_identifiable());

        r.id.clear();
        assert!(r.is_identifiable());

        r.name.clear();
        assert!(!r.is_identifiable());
    }

    #[test]
    fn test_metric_keys_serialize_snake_case() {
        let r = resource();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["metrics"]["star_count"], 12);
        assert_eq!(json["flags"][0], "is_fork");
    }
}
