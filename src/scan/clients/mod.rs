//! Wire-level platform clients.
//!
//! Clients own everything below the orchestration layer: authentication, pagination transport,
//! and any retry or rate-limit handling. The orchestrator only sees the capability contract
//! below and never retries on its own.

use crate::Result;
use crate::scan::{DetailKind, Platform, RawDetail, RawRecord};
use async_trait::async_trait;

mod github;
mod notion;

pub use github::GithubClient;
pub use notion::NotionClient;

/// Capability contract for one platform's enumeration calls.
///
/// `list_resources` reports failure at two levels: the outer `Result` is total enumeration
/// failure (unreachable platform, rejected authentication), while an `Err` element inside the
/// sequence is a mid-stream record failure that must not abort the rest of the scan.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    fn platform(&self) -> Platform;

    /// Enumerate resources, up to `limit` when given. Paginated internally.
    async fn list_resources(&self, limit: Option<usize>) -> Result<Vec<Result<RawRecord>>>;

    /// Supplementary per-resource fetches this client supports. Failures of these are
    /// non-fatal to the owning resource's classification.
    fn detail_kinds(&self) -> &[DetailKind] {
        &[]
    }

    async fn fetch_detail(&self, resource_id: &str, kind: DetailKind) -> Result<RawDetail> {
        let _ = kind;
        ohno::bail!("platform '{}' has no detail fetch for '{resource_id}'", self.platform())
    }
}
