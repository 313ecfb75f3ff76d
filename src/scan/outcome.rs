use crate::scan::{Classification, NormalizedResource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::Display;

/// Why a resource could not be scanned cleanly. Platform-level conditions (missing credential,
/// total enumeration failure) are carried by the platform's `ScanStatus` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Enumeration broke mid-stream; records before the break were kept.
    Transport,

    /// A single resource's supplementary fetch failed; the resource is still classified
    /// from whatever metadata was retrievable.
    PartialMetadata,

    /// Extraction produced a record so malformed that no policy rule applies.
    ClassificationUnreachable,
}

/// Tagged per-resource result. A platform scan never aborts on a `Failure`; it accumulates
/// all outcomes in enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    Success {
        resource: NormalizedResource,
        classification: Classification,
    },
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        resource_id: Option<String>,
        kind: FailureKind,
        #[serde(serialize_with = "serialize_error", deserialize_with = "deserialize_error")]
        error: Arc<ohno::AppError>,
    },
}

impl ScanOutcome {
    /// The classification, for successful outcomes.
    #[must_use]
    pub const fn classification(&self) -> Option<Classification> {
        match self {
            Self::Success { classification, .. } => Some(*classification),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A suppressed per-resource failure, recorded as data rather than merely logged and forgotten.
///
/// Kept separate from the ordered outcome sequence: the owning resource still appears there
/// exactly once with a valid classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFailure {
    pub resource_id: String,
    pub kind: FailureKind,
    #[serde(serialize_with = "serialize_error", deserialize_with = "deserialize_error")]
    pub error: Arc<ohno::AppError>,
}

/// Serialize `Arc<ohno::AppError>` as its display string
fn serialize_error<S>(error: &Arc<ohno::AppError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("{error}"))
}

/// Deserialize a string back into `Arc<ohno::AppError>`
fn deserialize_error<'de, D>(deserializer: D) -> Result<Arc<ohno::AppError>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let error_str = String::deserialize(deserializer)?;
    Ok(Arc::new(ohno::app_err!("{error_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_error_serializes_as_string() {
        let outcome = ScanOutcome::Failure {
            resource_id: Some("acme/widget".into()),
            kind: FailureKind::PartialMetadata,
            error: Arc::new(ohno::app_err!("workflow fetch failed")),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "failure");
        assert_eq!(json["kind"], "partial_metadata");
        assert_eq!(json["error"], "workflow fetch failed");

        let back: ScanOutcome = serde_json::from_value(json).unwrap();
        assert!(!back.is_success());
    }

    #[test]
    fn test_failure_without_id_omits_field() {
        let outcome = ScanOutcome::Failure {
            resource_id: None,
            kind: FailureKind::Transport,
            error: Arc::new(ohno::app_err!("connection reset")),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("resource_id").is_none());
    }
}
