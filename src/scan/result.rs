use crate::scan::{Classification, Platform, ScanFailure, ScanOutcome};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// Terminal state of one platform scan.
///
/// Serialized in the compact `ok` / `partial` / `skipped:<reason>` / `error:<reason>` form so the
/// persisted snapshot stays stable for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ScanStatus {
    /// Every enumerated resource was scanned and classified cleanly.
    Ok,

    /// The scan completed but at least one per-resource failure was recorded.
    Partial,

    /// The platform was never scanned (no credential, or no client implementation).
    Skipped { reason: String },

    /// Enumeration itself failed; the platform produced no outcomes.
    Error { reason: String },
}

impl ScanStatus {
    pub const SKIPPED_NO_CREDENTIAL: &'static str = "no-credential";
    pub const SKIPPED_UNSUPPORTED: &'static str = "unsupported";
    pub const ERROR_TIMEOUT: &'static str = "timeout";

    #[must_use]
    pub const fn is_terminal_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Partial => write!(f, "partial"),
            Self::Skipped { reason } => write!(f, "skipped:{reason}"),
            Self::Error { reason } => write!(f, "error:{reason}"),
        }
    }
}

impl FromStr for ScanStatus {
    type Err = ohno::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "partial" => Ok(Self::Partial),
            _ => {
                if let Some(reason) = s.strip_prefix("skipped:") {
                    Ok(Self::Skipped { reason: reason.to_owned() })
                } else if let Some(reason) = s.strip_prefix("error:") {
                    Ok(Self::Error { reason: reason.to_owned() })
                } else {
                    Err(ohno::app_err!("unrecognized scan status '{s}'"))
                }
            }
        }
    }
}

impl From<ScanStatus> for String {
    fn from(status: ScanStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for ScanStatus {
    type Error = ohno::AppError;

    fn try_from(s: String) -> Result<Self, ohno::AppError> {
        s.parse()
    }
}

/// The accumulated result of scanning one platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformScanResult {
    pub platform: Platform,
    pub status: ScanStatus,

    /// Per-resource outcomes, in enumeration order from the source platform.
    pub outcomes: Vec<ScanOutcome>,

    /// Suppressed supplementary-fetch failures for resources that were still classified.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail_failures: Vec<ScanFailure>,

    /// Counts of successful outcomes by classification. Every label is present, zero-filled.
    pub counts: BTreeMap<Classification, u64>,
}

impl PlatformScanResult {
    /// A platform that was never scanned.
    #[must_use]
    pub fn skipped(platform: Platform, reason: &str) -> Self {
        Self {
            platform,
            status: ScanStatus::Skipped { reason: reason.to_owned() },
            outcomes: Vec::new(),
            detail_failures: Vec::new(),
            counts: zero_counts(),
        }
    }

    /// A platform whose enumeration failed outright.
    #[must_use]
    pub fn errored(platform: Platform, error: &Arc<ohno::AppError>) -> Self {
        Self {
            platform,
            status: ScanStatus::Error { reason: format!("{error}") },
            outcomes: Vec::new(),
            detail_failures: Vec::new(),
            counts: zero_counts(),
        }
    }

    /// A platform whose scan did not complete before the run deadline.
    #[must_use]
    pub fn timed_out(platform: Platform) -> Self {
        Self {
            platform,
            status: ScanStatus::Error {
                reason: ScanStatus::ERROR_TIMEOUT.to_owned(),
            },
            outcomes: Vec::new(),
            detail_failures: Vec::new(),
            counts: zero_counts(),
        }
    }

    /// Number of successfully classified resources.
    #[must_use]
    pub fn resource_count(&self) -> u64 {
        self.outcomes.iter().filter(|o| o.is_success()).count() as u64
    }
}

/// A counts map with every classification present at zero.
#[must_use]
pub fn zero_counts() -> BTreeMap<Classification, u64> {
    Classification::iter().map(|c| (c, 0)).collect()
}
