use crate::scan::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

/// Kind of supplementary metadata a client can fetch for a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Workflows,
    Branches,
    Tags,
}

/// One raw, platform-shaped record as returned by a platform's enumeration call.
///
/// Response shapes are heterogeneous per platform, so no shared schema is assumed: the fields are
/// an untyped JSON map consumed only by that platform's extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub platform: Platform,
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Wrap a platform response value. Non-object values degrade to an empty field map.
    #[must_use]
    pub fn new(platform: Platform, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { platform, fields }
    }

    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.fields.get(name).and_then(Value::as_u64)
    }

    #[must_use]
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    /// Parse an RFC 3339 timestamp field. Malformed timestamps degrade to `None`.
    #[must_use]
    pub fn time_field(&self, name: &str) -> Option<DateTime<Utc>> {
        self.str_field(name)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Supplementary metadata fetched for one resource (workflow, branch, or tag listings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDetail {
    pub kind: DetailKind,
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_accessors() {
        let record = RawRecord::new(
            Platform::GitHub,
            json!({
                "name": "widget",
                "size": 42,
                "fork": true,
                "pushed_at": "2025-06-01T12:00:00Z",
            }),
        );

        assert_eq!(record.str_field("name"), Some("widget"));
        assert_eq!(record.u64_field("size"), Some(42));
        assert_eq!(record.bool_field("fork"), Some(true));
        assert_eq!(record.time_field("pushed_at").unwrap().to_rfc3339(), "2025-06-01T12:00:00+00:00");
    }

    #[test]
    fn test_missing_and_mistyped_fields_degrade_to_none() {
        let record = RawRecord::new(Platform::GitHub, json!({"size": "not-a-number", "pushed_at": "yesterday"}));

        assert_eq!(record.str_field("name"), None);
        assert_eq!(record.u64_field("size"), None);
        assert_eq!(record.time_field("pushed_at"), None);
    }

    #[test]
    fn test_non_object_value_degrades_to_empty_map() {
        let record = RawRecord::new(Platform::Notion, json!(["not", "an", "object"]));
        assert!(record.fields.is_empty());
    }
}
