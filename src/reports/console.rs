use crate::Result;
use crate::scan::{Classification, InventorySnapshot, ScanStatus};
use clap::ValueEnum;
use core::fmt::Write;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::{IsTerminal, stdout};
use strum::IntoEnumIterator;

const SEPARATOR_WIDTH: usize = 40;

/// Control when to use colored output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when writing to a terminal
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Write a human-readable summary of one inventory snapshot.
pub fn generate_summary<W: Write>(snapshot: &InventorySnapshot, color: ColorMode, writer: &mut W) -> Result<()> {
    let colored = color.enabled();

    writeln!(writer, "{}", "═".repeat(SEPARATOR_WIDTH))?;
    writeln!(writer, "  Inventory Scan Summary")?;
    writeln!(writer, "{}", "═".repeat(SEPARATOR_WIDTH))?;
    writeln!(writer, "Scanned at : {}", snapshot.scan_timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer, "Scanner    : v{}", snapshot.scanner_version)?;
    writeln!(writer, "Resources  : {}", snapshot.total_resources)?;
    writeln!(writer)?;

    writeln!(writer, "Platforms:")?;
    for result in &snapshot.platforms {
        let status = paint(colored, &result.status.to_string(), status_color(&result.status));
        writeln!(
            writer,
            "  {:<10} {status:<24} {} resource(s)",
            result.platform.to_string(),
            result.resource_count()
        )?;

        if !result.detail_failures.is_empty() {
            writeln!(writer, "  {:<10} {} suppressed detail failure(s)", "", result.detail_failures.len())?;
        }
    }
    writeln!(writer)?;

    writeln!(writer, "Classification:")?;
    for classification in Classification::iter() {
        let count = snapshot.counts.get(&classification).copied().unwrap_or_default();
        let label = paint(colored, &classification.to_string(), classification_color(classification));
        writeln!(writer, "  ● {label:<20} {count}")?;
    }

    Ok(())
}

fn paint(colored: bool, text: &str, color: AnsiColors) -> String {
    if colored {
        text.color(color).to_string()
    } else {
        text.to_owned()
    }
}

const fn status_color(status: &ScanStatus) -> AnsiColors {
    match status {
        ScanStatus::Ok => AnsiColors::Green,
        ScanStatus::Partial => AnsiColors::Yellow,
        ScanStatus::Skipped { .. } => AnsiColors::Default,
        ScanStatus::Error { .. } => AnsiColors::Red,
    }
}

const fn classification_color(classification: Classification) -> AnsiColors {
    match classification {
        Classification::Core => AnsiColors::Cyan,
        Classification::Active => AnsiColors::Green,
        Classification::Consolidate => AnsiColors::Yellow,
        Classification::Archive => AnsiColors::Blue,
        Classification::Deprecate => AnsiColors::Red,
        Classification::Error => AnsiColors::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Platform, PlatformScanResult};
    use chrono::Utc;

    #[test]
    fn test_summary_lists_every_platform_and_label() {
        let snapshot = InventorySnapshot::assemble_from(
            Utc::now(),
            vec![
                PlatformScanResult::skipped(Platform::GitHub, ScanStatus::SKIPPED_NO_CREDENTIAL),
                PlatformScanResult::timed_out(Platform::Notion),
            ],
        );

        let mut out = String::new();
        generate_summary(&snapshot, ColorMode::Never, &mut out).unwrap();

        assert!(out.contains("github"));
        assert!(out.contains("skipped:no-credential"));
        assert!(out.contains("error:timeout"));
        for label in ["CORE", "ACTIVE", "CONSOLIDATE", "ARCHIVE", "DEPRECATE", "ERROR"] {
            assert!(out.contains(label), "summary is missing the {label} label");
        }
    }
}
