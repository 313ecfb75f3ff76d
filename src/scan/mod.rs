//! The scan-and-classify engine: platform enumeration, defensive extraction, the classification
//! policy, and snapshot assembly.

pub mod clients;

mod assembler;
mod classify;
mod extract;
mod orchestrator;
mod outcome;
mod platform;
mod raw_record;
mod resource;
mod result;
mod snapshot;

pub use assembler::{Assembler, ClientSlot};
pub use clients::{GithubClient, NotionClient, PlatformClient};
pub use classify::{Classification, classify};
pub use extract::{apply_detail, extract};
pub use orchestrator::scan_platform;
pub use outcome::{FailureKind, ScanFailure, ScanOutcome};
pub use platform::Platform;
pub use raw_record::{DetailKind, RawDetail, RawRecord};
pub use resource::{Flag, Metric, NormalizedResource};
pub use result::{PlatformScanResult, ScanStatus, zero_counts};
pub use snapshot::InventorySnapshot;
