use crate::Result;
use crate::config::ScanConfig;
use crate::scan::clients::PlatformClient;
use crate::scan::{
    Classification, FailureKind, NormalizedResource, PlatformScanResult, RawRecord, ScanFailure, ScanOutcome, ScanStatus, apply_detail,
    classify, extract, zero_counts,
};
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use std::sync::Arc;

const LOG_TARGET: &str = "orchestrtr";

/// One enumerated record after extraction and detail enrichment, still in enumeration order.
enum Scanned {
    Resource(NormalizedResource, Vec<ScanFailure>),
    StreamError(ohno::AppError),
}

/// Drive one platform's scan: enumerate, extract, enrich, classify, accumulate.
///
/// Per-resource failures never abort the scan; they are folded into the result as data. The one
/// total-failure case is enumeration itself failing, which yields an `error:<reason>` result with
/// an empty outcome sequence. No retries happen at this layer; retry and backoff belong to the
/// client.
pub async fn scan_platform(client: &dyn PlatformClient, config: &ScanConfig, now: DateTime<Utc>, limit: Option<usize>) -> PlatformScanResult {
    let platform = client.platform();

    log::info!(target: LOG_TARGET, "Scanning platform '{platform}'");

    let mut records = match client.list_resources(limit).await {
        Ok(records) => records,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Enumeration failed for platform '{platform}': {e:#}");
            return PlatformScanResult::errored(platform, &Arc::new(e));
        }
    };

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    // Detail fetches run with bounded concurrency; `buffered` keeps enumeration order so the
    // outcome sequence is stable regardless of which fetch finishes first. A zero bound would
    // never poll anything, so it is clamped to sequential.
    let scanned: Vec<Scanned> = futures_util::stream::iter(records)
        .map(|record| scan_one(client, record, now))
        .buffered(config.detail_concurrency.max(1))
        .collect()
        .await;

    let mut outcomes = Vec::with_capacity(scanned.len());
    let mut detail_failures = Vec::new();
    let mut counts = zero_counts();

    for entry in scanned {
        match entry {
            Scanned::Resource(resource, mut failures) => {
                let classification = classify(&resource, config);
                if classification == Classification::Error {
                    log::warn!(target: LOG_TARGET, "Resource on '{platform}' is too malformed to classify, recording as ERROR");
                    failures.push(ScanFailure {
                        resource_id: resource.id.clone(),
                        kind: FailureKind::ClassificationUnreachable,
                        error: Arc::new(ohno::app_err!("record carries neither an id nor a name")),
                    });
                } else {
                    log::debug!(target: LOG_TARGET, "Classified '{}' on '{platform}' as {classification}", resource.id);
                }

                *counts.entry(classification).or_default() += 1;
                detail_failures.append(&mut failures);
                outcomes.push(ScanOutcome::Success { resource, classification });
            }
            Scanned::StreamError(e) => {
                outcomes.push(ScanOutcome::Failure {
                    resource_id: None,
                    kind: FailureKind::Transport,
                    error: Arc::new(e),
                });
            }
        }
    }

    let clean = detail_failures.is_empty() && outcomes.iter().all(ScanOutcome::is_success);
    let status = if clean { ScanStatus::Ok } else { ScanStatus::Partial };

    log::info!(
        target: LOG_TARGET,
        "Platform '{platform}' scan finished: status={status}, {} outcome(s), {} suppressed failure(s)",
        outcomes.len(),
        detail_failures.len()
    );

    PlatformScanResult {
        platform,
        status,
        outcomes,
        detail_failures,
        counts,
    }
}

/// Extract one record and enrich it with whatever supplementary metadata is retrievable.
/// A detail fetch failing leaves the resource classifiable from partial metadata.
async fn scan_one(client: &dyn PlatformClient, record: Result<RawRecord>, now: DateTime<Utc>) -> Scanned {
    let raw = match record {
        Ok(raw) => raw,
        Err(e) => return Scanned::StreamError(e),
    };

    let mut resource = extract(&raw, now);
    let mut failures = Vec::new();

    if !resource.id.is_empty() {
        for kind in client.detail_kinds() {
            match client.fetch_detail(&resource.id, *kind).await {
                Ok(detail) => apply_detail(&mut resource, &detail),
                Err(e) => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Could not fetch {kind} for '{}', classifying from partial metadata: {e:#}",
                        resource.id
                    );
                    failures.push(ScanFailure {
                        resource_id: resource.id.clone(),
                        kind: FailureKind::PartialMetadata,
                        error: Arc::new(e),
                    });
                }
            }
        }
    }

    Scanned::Resource(resource, failures)
}
