use crate::commands::common::{Credentials, LogLevel, discover_clients, init_logging, print_warnings};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use platform_inventory::Result;
use platform_inventory::config::ScanConfig;
use platform_inventory::reports::{ColorMode, OutputFormat, generate_summary, write_snapshot};
use platform_inventory::scan::Assembler;

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Notion integration token
    #[arg(long, value_name = "TOKEN", env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Path to configuration file [default: one of inventory.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Snapshot output path [default: inventory/<platform-set>.<format>]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Snapshot output format
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// Maximum number of resources to scan per platform (for testing)
    #[arg(long, value_name = "N")]
    pub max_resources: Option<usize>,

    /// Overall run deadline in seconds, overriding the configured value
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Run one scan-and-classify pass and persist the snapshot.
///
/// The exit code is zero whenever a snapshot was produced, even when every platform was skipped
/// or errored; only a run that cannot start at all (no platforms configured) fails.
pub async fn run_scan(args: &ScanArgs) -> Result<()> {
    init_logging(args.log_level);

    let (mut config, warnings) = ScanConfig::load(Utf8Path::new("."), args.config.as_ref())?;
    print_warnings(&warnings);

    if let Some(timeout) = args.timeout {
        config.scan_timeout_secs = timeout;
    }

    let credentials = Credentials {
        github_token: args.github_token.clone(),
        notion_token: args.notion_token.clone(),
    };
    let slots = discover_clients(&config, &credentials)?;

    let output = args.output.clone().unwrap_or_else(|| default_output_path(&config, args.format));

    let assembler = Assembler::new(config, slots, args.max_resources);
    let snapshot = assembler.assemble().await?;

    let mut summary = String::new();
    generate_summary(&snapshot, args.color, &mut summary)?;
    print!("{summary}");

    write_snapshot(&snapshot, &output, args.format)?;
    println!("\nSnapshot written to: {output}");

    Ok(())
}

/// Default output path: `inventory/<platform-set>.<format>`, e.g. `inventory/github-notion.json`.
fn default_output_path(config: &ScanConfig, format: OutputFormat) -> Utf8PathBuf {
    let set: Vec<String> = config.platforms.iter().map(ToString::to_string).collect();
    Utf8PathBuf::from(format!("inventory/{}.{format}", set.join("-")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_inventory::scan::Platform;

    #[test]
    fn test_default_output_path_reflects_platform_set() {
        let config = ScanConfig {
            platforms: vec![Platform::GitHub, Platform::Notion],
            ..ScanConfig::default()
        };

        assert_eq!(default_output_path(&config, OutputFormat::Json), "inventory/github-notion.json");
        assert_eq!(default_output_path(&config, OutputFormat::Yaml), "inventory/github-notion.yaml");
    }
}
