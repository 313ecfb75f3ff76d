use crate::Result;
use crate::scan::Platform;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use strum::IntoEnumIterator;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

const fn default_active_threshold_days() -> u64 {
    30
}

const fn default_active_item_threshold() -> u64 {
    5
}

const fn default_archive_threshold_days() -> u64 {
    180
}

const fn default_scan_timeout_secs() -> u64 {
    300
}

const fn default_detail_concurrency() -> usize {
    4
}

fn default_platforms() -> Vec<Platform> {
    Platform::iter().collect()
}

/// Static configuration for one scan run: the CORE allow-list, the classification thresholds,
/// and the platform set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Resource identifiers always classified CORE, matched against id or name exactly.
    #[serde(default)]
    pub core_resources: Vec<String>,

    /// A resource with activity strictly more recent than this many days is ACTIVE.
    #[serde(default = "default_active_threshold_days")]
    pub active_threshold_days: u64,

    /// Alternative ACTIVE trigger: strictly more than this many open items.
    #[serde(default = "default_active_item_threshold")]
    pub active_item_threshold: u64,

    /// A non-empty resource with no activity for strictly more than this many days is ARCHIVE.
    #[serde(default = "default_archive_threshold_days")]
    pub archive_threshold_days: u64,

    /// The platform set to scan, in the order results appear in the snapshot.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,

    /// Overall run deadline; platforms that have not completed by then are marked errored.
    #[serde(default = "default_scan_timeout_secs")]
    pub scan_timeout_secs: u64,

    /// Maximum concurrent per-resource detail fetches against one platform.
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            core_resources: Vec::new(),
            active_threshold_days: default_active_threshold_days(),
            active_item_threshold: default_active_item_threshold(),
            archive_threshold_days: default_archive_threshold_days(),
            platforms: default_platforms(),
            scan_timeout_secs: default_scan_timeout_secs(),
            detail_concurrency: default_detail_concurrency(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_path: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading inventory configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_path.join("inventory.toml"),
                base_path.join("inventory.yml"),
                base_path.join("inventory.yaml"),
                base_path.join("inventory.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading inventory configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self).into_app_err("serializing configuration to TOML")?,
            "yml" | "yaml" => serde_yaml::to_string(self).into_app_err("serializing configuration to YAML")?,
            "json" => serde_json::to_string_pretty(self).into_app_err("serializing configuration to JSON")?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))
    }

    /// Detect non-fatal configuration problems. Warnings are reported, never enforced.
    pub fn validate(&self, warnings: &mut Vec<String>) {
        if self.archive_threshold_days <= self.active_threshold_days {
            warnings.push(format!(
                "archive_threshold_days ({}) is not above active_threshold_days ({}); the archive rule can never fire",
                self.archive_threshold_days, self.active_threshold_days
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.core_resources {
            if !seen.insert(name.as_str()) {
                warnings.push(format!("duplicate core_resources entry '{name}'"));
            }
        }

        let mut seen_platforms = HashSet::new();
        for platform in &self.platforms {
            if !seen_platforms.insert(platform) {
                warnings.push(format!("duplicate platform '{platform}'"));
            }
        }

        if self.platforms.is_empty() {
            warnings.push("no platforms configured; a scan will have nothing to do".to_owned());
        }

        if self.detail_concurrency == 0 {
            warnings.push("detail_concurrency of 0 is treated as 1; configure at least 1".to_owned());
        }
    }
}
