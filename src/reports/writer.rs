use crate::Result;
use crate::scan::InventorySnapshot;
use camino::Utf8Path;
use clap::ValueEnum;
use ohno::IntoAppError;
use std::fs;
use strum::Display;

const LOG_TARGET: &str = "    writer";

/// Persisted snapshot format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Persist one snapshot to durable storage. Field names in the output are stable across
/// versions for downstream consumers.
pub fn write_snapshot(snapshot: &InventorySnapshot, path: &Utf8Path, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot).into_app_err("serializing snapshot to JSON")?,
        OutputFormat::Yaml => serde_yaml::to_string(snapshot).into_app_err("serializing snapshot to YAML")?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("creating output directory {parent}"))?;
    }

    fs::write(path, text).into_app_err_with(|| format!("writing snapshot to {path}"))?;

    log::info!(target: LOG_TARGET, "Snapshot written to {path}");
    Ok(())
}
