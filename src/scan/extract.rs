use crate::scan::{DetailKind, Flag, Metric, NormalizedResource, Platform, RawDetail, RawRecord};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Produce a normalized metadata record from one raw platform record.
///
/// This is defensive normalization, not validation: it never fails, and any missing or malformed
/// source field maps to an absent value in the output. The scan timestamp is an argument so the
/// function stays deterministic and independently testable with raw fixtures.
#[must_use]
pub fn extract(raw: &RawRecord, now: DateTime<Utc>) -> NormalizedResource {
    match raw.platform {
        Platform::GitHub => extract_github(raw, now),
        Platform::Notion => extract_notion(raw, now),
        Platform::Linear | Platform::Jira => extract_generic(raw),
    }
}

/// Fold supplementary metadata into an already-extracted resource. Pure, like `extract`.
pub fn apply_detail(resource: &mut NormalizedResource, detail: &RawDetail) {
    let metric = match detail.kind {
        DetailKind::Workflows => Metric::WorkflowCount,
        DetailKind::Branches => Metric::BranchCount,
        DetailKind::Tags => Metric::TagCount,
    };
    let _ = resource.metrics.insert(metric, detail.items.len() as u64);
}

fn extract_github(raw: &RawRecord, now: DateTime<Utc>) -> NormalizedResource {
    let name = raw.str_field("name").unwrap_or_default().to_owned();

    // full_name ("owner/name") is the platform-unique identifier and is what the client
    // needs back for detail fetches.
    let id = raw.str_field("full_name").map_or_else(|| name.clone(), ToOwned::to_owned);

    let mut metrics = BTreeMap::new();
    insert_metric(&mut metrics, Metric::OpenItemCount, raw.u64_field("open_issues_count"));
    insert_metric(&mut metrics, Metric::StarCount, raw.u64_field("stargazers_count"));
    insert_metric(&mut metrics, Metric::ForkCount, raw.u64_field("forks_count"));
    insert_metric(&mut metrics, Metric::WatcherCount, raw.u64_field("watchers_count"));
    insert_metric(&mut metrics, Metric::SizeKb, raw.u64_field("size"));
    insert_metric(
        &mut metrics,
        Metric::DaysSinceLastActivity,
        raw.time_field("pushed_at").map(|pushed| days_between(pushed, now)),
    );

    let mut flags = BTreeSet::new();
    insert_flag(&mut flags, Flag::IsFork, raw.bool_field("fork"));
    insert_flag(&mut flags, Flag::IsArchived, raw.bool_field("archived"));
    insert_flag(&mut flags, Flag::IsPrivate, raw.bool_field("private"));
    insert_flag(&mut flags, Flag::IsDisabled, raw.bool_field("disabled"));
    insert_flag(&mut flags, Flag::IsEmpty, raw.u64_field("size").map(|size| size == 0));

    NormalizedResource {
        id,
        name,
        url: raw.str_field("html_url").map(ToOwned::to_owned),
        created_at: raw.time_field("created_at"),
        updated_at: raw.time_field("updated_at"),
        metrics,
        flags,
        platform: Platform::GitHub,
    }
}

fn extract_notion(raw: &RawRecord, now: DateTime<Utc>) -> NormalizedResource {
    let is_database = raw.str_field("object") == Some("database");

    let mut metrics = BTreeMap::new();
    insert_metric(
        &mut metrics,
        Metric::DaysSinceLastActivity,
        raw.time_field("last_edited_time").map(|edited| days_between(edited, now)),
    );

    let mut flags = BTreeSet::new();
    if is_database {
        let _ = flags.insert(Flag::IsDatabase);
    }

    NormalizedResource {
        id: raw.str_field("id").unwrap_or_default().to_owned(),
        name: notion_title(raw),
        url: raw.str_field("url").map(ToOwned::to_owned),
        created_at: raw.time_field("created_time"),
        updated_at: raw.time_field("last_edited_time"),
        metrics,
        flags,
        platform: Platform::Notion,
    }
}

fn extract_generic(raw: &RawRecord) -> NormalizedResource {
    NormalizedResource {
        id: raw.str_field("id").unwrap_or_default().to_owned(),
        name: raw.str_field("name").or_else(|| raw.str_field("title")).unwrap_or_default().to_owned(),
        url: raw.str_field("url").map(ToOwned::to_owned),
        created_at: raw.time_field("created_at"),
        updated_at: raw.time_field("updated_at"),
        metrics: BTreeMap::new(),
        flags: BTreeSet::new(),
        platform: raw.platform,
    }
}

/// Title of a Notion object. Pages bury it inside a title-typed property; databases carry a
/// top-level rich-text array. Anything unrecognizable becomes "Untitled", matching what the
/// Notion UI shows for nameless objects.
fn notion_title(raw: &RawRecord) -> String {
    let title_array = if let Some(Value::Object(properties)) = raw.fields.get("properties") {
        properties
            .values()
            .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
            .and_then(|prop| prop.get("title"))
    } else {
        raw.fields.get("title")
    };

    title_array
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("plain_text"))
        .and_then(Value::as_str)
        .map_or_else(|| "Untitled".to_owned(), ToOwned::to_owned)
}

/// Whole days from `earlier` to `now`, clamped at zero for timestamps in the future.
fn days_between(earlier: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - earlier).num_days().max(0).cast_unsigned()
}

fn insert_metric(metrics: &mut BTreeMap<Metric, u64>, metric: Metric, value: Option<u64>) {
    if let Some(value) = value {
        let _ = metrics.insert(metric, value);
    }
}

fn insert_flag(flags: &mut BTreeSet<Flag>, flag: Flag, value: Option<bool>) {
    if value == Some(true) {
        let _ = flags.insert(flag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-07-01T00:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn github_record() -> RawRecord {
        RawRecord::new(
            Platform::GitHub,
            json!({
                "name": "widget",
                "full_name": "acme/widget",
                "html_url": "https://github.com/acme/widget",
                "fork": false,
                "archived": true,
                "private": true,
                "size": 2048,
                "stargazers_count": 7,
                "forks_count": 2,
                "watchers_count": 7,
                "open_issues_count": 3,
                "created_at": "2020-01-15T10:30:00Z",
                "updated_at": "2025-05-20T08:00:00Z",
                "pushed_at": "2025-06-21T00:00:00Z",
            }),
        )
    }

    #[test]
    fn test_github_extraction() {
        let resource = extract(&github_record(), fixed_now());

        assert_eq!(resource.id, "acme/widget");
        assert_eq!(resource.name, "widget");
        assert_eq!(resource.url.as_deref(), Some("https://github.com/acme/widget"));
        assert_eq!(resource.metric(Metric::DaysSinceLastActivity), Some(10));
        assert_eq!(resource.metric(Metric::OpenItemCount), Some(3));
        assert_eq!(resource.metric(Metric::SizeKb), Some(2048));
        assert!(resource.has_flag(Flag::IsArchived));
        assert!(resource.has_flag(Flag::IsPrivate));
        assert!(!resource.has_flag(Flag::IsFork));
        assert!(!resource.has_flag(Flag::IsEmpty));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let record = github_record();
        assert_eq!(extract(&record, fixed_now()), extract(&record, fixed_now()));
    }

    #[test]
    fn test_github_missing_fields_degrade_to_absent() {
        let record = RawRecord::new(Platform::GitHub, json!({"name": "bare"}));
        let resource = extract(&record, fixed_now());

        assert_eq!(resource.id, "bare");
        assert_eq!(resource.metric(Metric::DaysSinceLastActivity), None);
        assert_eq!(resource.metric(Metric::SizeKb), None);
        assert!(resource.metrics.is_empty());
        assert!(resource.flags.is_empty());
        assert_eq!(resource.created_at, None);
    }

    #[test]
    fn test_github_future_push_clamps_to_zero_days() {
        let record = RawRecord::new(Platform::GitHub, json!({"name": "r", "pushed_at": "2025-07-02T00:00:00Z"}));
        let resource = extract(&record, fixed_now());
        assert_eq!(resource.metric(Metric::DaysSinceLastActivity), Some(0));
    }

    #[test]
    fn test_notion_page_extraction() {
        let record = RawRecord::new(
            Platform::Notion,
            json!({
                "object": "page",
                "id": "a1b2c3",
                "url": "https://notion.so/a1b2c3",
                "created_time": "2024-01-01T00:00:00Z",
                "last_edited_time": "2025-06-26T00:00:00Z",
                "properties": {
                    "Name": {"type": "title", "title": [{"plain_text": "Roadmap"}]},
                    "Status": {"type": "select"},
                },
            }),
        );

        let resource = extract(&record, fixed_now());
        assert_eq!(resource.name, "Roadmap");
        assert_eq!(resource.metric(Metric::DaysSinceLastActivity), Some(5));
        assert!(!resource.has_flag(Flag::IsDatabase));
    }

    #[test]
    fn test_notion_database_extraction() {
        let record = RawRecord::new(
            Platform::Notion,
            json!({
                "object": "database",
                "id": "d4e5f6",
                "title": [{"plain_text": "Tasks"}],
            }),
        );

        let resource = extract(&record, fixed_now());
        assert_eq!(resource.name, "Tasks");
        assert!(resource.has_flag(Flag::IsDatabase));
    }

    #[test]
    fn test_notion_nameless_page_is_untitled() {
        let record = RawRecord::new(Platform::Notion, json!({"object": "page", "id": "xyz", "properties": {}}));
        let resource = extract(&record, fixed_now());
        assert_eq!(resource.name, "Untitled");
    }

    #[test]
    fn test_apply_detail_sets_count_metric() {
        let mut resource = extract(&github_record(), fixed_now());
        apply_detail(
            &mut resource,
            &RawDetail {
                kind: DetailKind::Workflows,
                items: vec!["ci".into(), "release".into()],
            },
        );
        assert_eq!(resource.metric(Metric::WorkflowCount), Some(2));
    }
}
