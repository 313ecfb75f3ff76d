use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// An external system being scanned, distinguished by its client implementation and credential.
///
/// The declaration order is the canonical scan order: snapshots always list platforms in this
/// order regardless of which scan finishes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    GitHub,
    Notion,
    Linear,
    Jira,
}

impl Platform {
    /// Name of the environment variable holding this platform's credential.
    #[must_use]
    pub const fn credential_var(self) -> &'static str {
        match self {
            Self::GitHub => "GITHUB_TOKEN",
            Self::Notion => "NOTION_API_KEY",
            Self::Linear => "LINEAR_API_KEY",
            Self::Jira => "JIRA_API_TOKEN",
        }
    }
}
