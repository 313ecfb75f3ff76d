use crate::config::ScanConfig;
use crate::scan::{Flag, Metric, NormalizedResource};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Lifecycle classification assigned to every scanned resource.
///
/// The first five labels are the decision domain; `Error` is the defensive bucket for resources
/// whose metadata was too malformed for any rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Core,
    Active,
    Consolidate,
    Archive,
    Deprecate,
    Error,
}

/// Map a normalized resource to exactly one classification.
///
/// This is a pure decision table evaluated in a fixed order; the ordering is a policy invariant,
/// not incidental. First match wins:
///
/// 1. the resource's id or name is on the CORE allow-list
/// 2. recent activity (strictly under the active threshold) or an open-item count strictly above
///    the active item threshold
/// 3. stale (strictly over the archive threshold) and known non-empty
/// 4. a fork, or known empty
/// 5. everything else lands in `Consolidate`
///
/// A `days_since_last_activity` metric that could not be retrieved is treated as maximal
/// staleness: such a resource can never become `Active` through the recency rule, and counts as
/// stale for the archive rule. An unknown size is unknown, not zero, so it satisfies neither the
/// non-empty archive condition nor the empty deprecation condition.
#[must_use]
pub fn classify(resource: &NormalizedResource, config: &ScanConfig) -> Classification {
    if !resource.is_identifiable() {
        return Classification::Error;
    }

    if config
        .core_resources
        .iter()
        .any(|core| core == &resource.id || core == &resource.name)
    {
        return Classification::Core;
    }

    let days_since_activity = resource.metric(Metric::DaysSinceLastActivity);
    let open_items = resource.metric(Metric::OpenItemCount);
    let size = resource.metric(Metric::SizeKb);

    let recently_active = days_since_activity.is_some_and(|days| days < config.active_threshold_days);
    let busy = open_items.is_some_and(|count| count > config.active_item_threshold);
    if recently_active || busy {
        return Classification::Active;
    }

    let stale = days_since_activity.is_none_or(|days| days > config.archive_threshold_days);
    if stale && size.is_some_and(|kb| kb > 0) {
        return Classification::Archive;
    }

    if resource.has_flag(Flag::IsFork) || size == Some(0) {
        return Classification::Deprecate;
    }

    Classification::Consolidate
}
