use crate::Result;
use crate::config::ScanConfig;
use crate::scan::clients::PlatformClient;
use crate::scan::orchestrator::scan_platform;
use crate::scan::{InventorySnapshot, Platform, PlatformScanResult};
use chrono::Utc;
use core::time::Duration;
use futures_util::future::join_all;
use ohno::bail;

const LOG_TARGET: &str = " assembler";

/// A configured platform's client, or the reason it could not be constructed.
///
/// Credential absence is not an error: the platform is recorded as skipped in the snapshot and
/// the orchestrator is never invoked for it.
pub enum ClientSlot {
    Ready(Box<dyn PlatformClient>),
    Missing(&'static str),
}

impl core::fmt::Debug for ClientSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ready(client) => write!(f, "Ready({})", client.platform()),
            Self::Missing(reason) => write!(f, "Missing({reason})"),
        }
    }
}

/// Runs the scan orchestrator across every configured platform and merges the results into one
/// immutable inventory snapshot.
#[derive(Debug)]
pub struct Assembler {
    config: ScanConfig,
    slots: Vec<(Platform, ClientSlot)>,
    limit: Option<usize>,
    deadline: Duration,
}

impl Assembler {
    /// `slots` must be in the configured platform order; the snapshot preserves that order
    /// regardless of which scan finishes first.
    #[must_use]
    pub fn new(config: ScanConfig, slots: Vec<(Platform, ClientSlot)>, limit: Option<usize>) -> Self {
        let deadline = Duration::from_secs(config.scan_timeout_secs);
        Self {
            config,
            slots,
            limit,
            deadline,
        }
    }

    /// Scan all configured platforms and assemble the snapshot.
    ///
    /// Platform scans are mutually independent and run as concurrent tasks, each bounded by the
    /// run deadline; a platform that does not finish in time is marked `error:timeout` while
    /// completed results are still included. The snapshot timestamp is stamped once, here, so
    /// every resource in the snapshot shares one logical scan time.
    ///
    /// # Errors
    ///
    /// Fails only when the engine was invoked with nothing to do (no platforms configured);
    /// every other failure mode is captured inside the snapshot.
    pub async fn assemble(&self) -> Result<InventorySnapshot> {
        if self.slots.is_empty() {
            bail!("no platforms configured, nothing to scan");
        }

        let scan_timestamp = Utc::now();

        log::info!(target: LOG_TARGET, "Assembling inventory across {} platform(s)", self.slots.len());

        let scans = self.slots.iter().map(|(platform, slot)| async move {
            match slot {
                ClientSlot::Missing(reason) => {
                    log::info!(target: LOG_TARGET, "Platform '{platform}' skipped: {reason}");
                    PlatformScanResult::skipped(*platform, reason)
                }
                ClientSlot::Ready(client) => {
                    let scan = scan_platform(client.as_ref(), &self.config, scan_timestamp, self.limit);
                    match tokio::time::timeout(self.deadline, scan).await {
                        Ok(result) => result,
                        Err(_) => {
                            log::warn!(target: LOG_TARGET, "Platform '{platform}' scan exceeded the run deadline");
                            PlatformScanResult::timed_out(*platform)
                        }
                    }
                }
            }
        });

        let platforms = join_all(scans).await;
        let snapshot = InventorySnapshot::assemble_from(scan_timestamp, platforms);

        log::info!(
            target: LOG_TARGET,
            "Assembled snapshot: {} resource(s) across {} platform(s)",
            snapshot.total_resources,
            snapshot.platforms.len()
        );

        Ok(snapshot)
    }
}
