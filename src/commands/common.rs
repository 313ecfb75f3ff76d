//! Bootstrap logic shared by the subcommands: logging, configuration, and credential discovery.

use clap::ValueEnum;
use platform_inventory::Result;
use platform_inventory::config::ScanConfig;
use platform_inventory::scan::{ClientSlot, GithubClient, NotionClient, Platform, ScanStatus};

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}

/// Print non-fatal configuration warnings the way the other subcommands do.
pub fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        eprintln!("\n⚠️  Configuration validation warnings:");
        for warning in warnings {
            eprintln!("   {warning}");
        }
        eprintln!();
    }
}

/// Explicit credentials passed on the command line; anything absent falls back to the
/// platform's environment variable.
#[derive(Debug, Default)]
pub struct Credentials {
    pub github_token: Option<String>,
    pub notion_token: Option<String>,
}

impl Credentials {
    fn lookup(&self, platform: Platform) -> Option<String> {
        let from_args = match platform {
            Platform::GitHub => self.github_token.clone(),
            Platform::Notion => self.notion_token.clone(),
            Platform::Linear | Platform::Jira => None,
        };

        from_args
            .or_else(|| std::env::var(platform.credential_var()).ok())
            .filter(|token| !token.is_empty())
    }
}

/// Construct a client for every configured platform whose credential is present.
///
/// Credential absence is recorded, not raised: the platform lands in the snapshot as
/// `skipped:no-credential`. Linear and Jira are recognized platforms without a client
/// implementation yet; with a credential present they are recorded as `skipped:unsupported`.
pub fn discover_clients(config: &ScanConfig, credentials: &Credentials) -> Result<Vec<(Platform, ClientSlot)>> {
    let mut slots = Vec::with_capacity(config.platforms.len());

    for &platform in &config.platforms {
        let Some(token) = credentials.lookup(platform) else {
            slots.push((platform, ClientSlot::Missing(ScanStatus::SKIPPED_NO_CREDENTIAL)));
            continue;
        };

        let slot = match platform {
            Platform::GitHub => ClientSlot::Ready(Box::new(GithubClient::new(&token)?)),
            Platform::Notion => ClientSlot::Ready(Box::new(NotionClient::new(&token)?)),
            Platform::Linear | Platform::Jira => ClientSlot::Missing(ScanStatus::SKIPPED_UNSUPPORTED),
        };
        slots.push((platform, slot));
    }

    Ok(slots)
}
