use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use platform_inventory::Result;
use platform_inventory::config::{DEFAULT_CONFIG_TOML, ScanConfig};
use std::fs;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "inventory.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    // The embedded TOML keeps its explanatory comments; other formats get a plain
    // serialization of the defaults.
    if args.output.extension() == Some("toml") {
        fs::write(&args.output, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing configuration to {}", args.output))?;
    } else {
        ScanConfig::default().save(&args.output)?;
    }

    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
