use crate::commands::common::print_warnings;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use platform_inventory::Result;
use platform_inventory::config::ScanConfig;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of inventory.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    match ScanConfig::load(Utf8Path::new("."), args.config.as_ref()) {
        Ok((_, warnings)) => {
            println!("Configuration validation successful");
            if let Some(path) = &args.config {
                println!("Config file: {path}");
            } else {
                println!("Using default configuration (no config file found)");
            }

            print_warnings(&warnings);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            std::process::exit(1);
        }
    }
}
