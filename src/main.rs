//! A tool to scan external platforms and build a classified resource inventory.
//!
//! # Overview
//!
//! `platform-inventory` enumerates resources spread across several external platforms
//! (GitHub repositories, Notion pages and databases), extracts a normalized metadata
//! record per resource, assigns each one a lifecycle classification, and writes a single
//! inventory snapshot used to drive downstream consolidation decisions.
//!
//! # Quick Start
//!
//! Scan every platform whose credential is present in the environment:
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! export NOTION_API_KEY=secret_xxxxxxxxxxxxxxxx
//! platform-inventory scan
//! ```
//!
//! Platforms without a credential are recorded as skipped in the snapshot rather than
//! treated as errors, so a partially-configured environment still produces a usable
//! inventory.
//!
//! # Basic Usage
//!
//! **Write the snapshot somewhere specific, as YAML:**
//! ```bash
//! platform-inventory scan --output inventory/latest.yml --format yaml
//! ```
//!
//! **Cap the number of resources per platform (useful for testing):**
//! ```bash
//! platform-inventory scan --max-resources 25
//! ```
//!
//! **Generate a default configuration file:**
//! ```bash
//! platform-inventory init
//! ```
//!
//! **Validate a configuration file without scanning:**
//! ```bash
//! platform-inventory validate --config inventory.toml
//! ```
//!
//! # Classification
//!
//! Each scanned resource receives exactly one label, evaluated in order:
//!
//! - `CORE` — the resource is on the configured allow-list.
//! - `ACTIVE` — recent activity or a meaningful number of open items.
//! - `ARCHIVE` — stale but non-empty; worth preserving.
//! - `DEPRECATE` — a fork or an empty resource.
//! - `CONSOLIDATE` — everything else; candidates for merging.
//! - `ERROR` — the resource metadata was too malformed to classify.
//!
//! Thresholds and the allow-list live in `inventory.[toml|yml|yaml|json]`.
//!
//! # Exit Codes
//!
//! - `0`: a snapshot was produced, even if every platform was skipped or errored.
//! - non-zero: the scan could not run at all (for example, no platforms configured).

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use platform_inventory::Result;

mod commands;

use crate::commands::{InitArgs, ScanArgs, ValidateArgs, init_config, run_scan, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "platform-inventory", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: InventorySubcommand,
}

#[derive(Subcommand, Debug)]
enum InventorySubcommand {
    /// Scan the configured platforms and write an inventory snapshot
    Scan(Box<ScanArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        InventorySubcommand::Scan(scan_args) => run_scan(scan_args).await,
        InventorySubcommand::Init(init_args) => init_config(init_args),
        InventorySubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
