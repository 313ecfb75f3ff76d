use crate::Result;
use crate::scan::clients::PlatformClient;
use crate::scan::{DetailKind, Platform, RawDetail, RawRecord};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::models::Repository;
use ohno::{EnrichableExt, IntoAppError, app_err};

const LOG_TARGET: &str = "    github";
const REPO_PAGE_SIZE: u8 = 100;
const DETAIL_PAGE_SIZE: u8 = 100;

/// Recent tags are enough of a release signal; unbounded tag listings on old repositories
/// can run to thousands of entries.
const MAX_TAGS: usize = 10;

const DETAIL_KINDS: &[DetailKind] = &[DetailKind::Workflows, DetailKind::Branches, DetailKind::Tags];

/// GitHub client: enumerates every repository accessible to the authenticated user.
#[derive(Debug, Clone)]
pub struct GithubClient {
    octocrab: Octocrab,
}

impl GithubClient {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            octocrab: Octocrab::builder().personal_token(token).build()?,
        })
    }

    /// Split a repository identifier of the form `owner/name`.
    fn parse_repo_id(resource_id: &str) -> Result<(&str, &str)> {
        resource_id
            .split_once('/')
            .ok_or_else(|| app_err!("malformed GitHub repository id '{resource_id}', expected 'owner/name'"))
    }

    async fn list_workflow_names(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let page = self.octocrab.workflows(owner, repo).list().per_page(DETAIL_PAGE_SIZE).send().await?;
        Ok(page.items.into_iter().map(|workflow| workflow.name).collect())
    }

    async fn list_branch_names(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let page = self.octocrab.repos(owner, repo).list_branches().per_page(DETAIL_PAGE_SIZE).send().await?;
        Ok(page.items.into_iter().map(|branch| branch.name).collect())
    }

    async fn list_tag_names(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let page = self.octocrab.repos(owner, repo).list_tags().per_page(DETAIL_PAGE_SIZE).send().await?;
        Ok(page.items.into_iter().take(MAX_TAGS).map(|tag| tag.name).collect())
    }
}

#[async_trait]
impl PlatformClient for GithubClient {
    fn platform(&self) -> Platform {
        Platform::GitHub
    }

    async fn list_resources(&self, limit: Option<usize>) -> Result<Vec<Result<RawRecord>>> {
        let limit = limit.unwrap_or(usize::MAX);

        log::info!(target: LOG_TARGET, "Enumerating repositories for the authenticated user");

        // The first page failing means the platform is unreachable or rejected the token;
        // that is a total enumeration failure.
        let mut page = self
            .octocrab
            .current()
            .list_repos_for_authenticated_user()
            .type_("all")
            .per_page(REPO_PAGE_SIZE)
            .send()
            .await
            .into_app_err("could not enumerate GitHub repositories")?;

        let mut records: Vec<Result<RawRecord>> = Vec::new();

        loop {
            for repo in page.take_items() {
                if records.len() >= limit {
                    return Ok(records);
                }
                records.push(to_raw_record(repo));
            }

            if records.len() >= limit || page.next.is_none() {
                break;
            }

            // A failure past the first page is a mid-stream error: keep what was enumerated
            // so far and record the failure as one more element.
            let next_page = self
                .octocrab
                .get_page::<Repository>(&page.next)
                .await
                .into_app_err("repository enumeration failed mid-stream");
            match next_page {
                Ok(Some(next_page)) => page = next_page,
                Ok(None) => break,
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Repository enumeration failed mid-stream: {e:#}");
                    records.push(Err(e));
                    break;
                }
            }
        }

        log::info!(target: LOG_TARGET, "Enumerated {} repository record(s)", records.len());
        Ok(records)
    }

    fn detail_kinds(&self) -> &[DetailKind] {
        DETAIL_KINDS
    }

    async fn fetch_detail(&self, resource_id: &str, kind: DetailKind) -> Result<RawDetail> {
        let (owner, repo) = Self::parse_repo_id(resource_id)?;

        log::debug!(target: LOG_TARGET, "Fetching {kind} for '{resource_id}'");

        let items = match kind {
            DetailKind::Workflows => self.list_workflow_names(owner, repo).await,
            DetailKind::Branches => self.list_branch_names(owner, repo).await,
            DetailKind::Tags => self.list_tag_names(owner, repo).await,
        }
        .map_err(|e| e.enrich_with(|| format!("could not fetch {kind} for repository '{resource_id}'")))?;

        Ok(RawDetail { kind, items })
    }
}

fn to_raw_record(repo: Repository) -> Result<RawRecord> {
    let value = serde_json::to_value(repo).into_app_err("could not convert repository record to JSON")?;
    Ok(RawRecord::new(Platform::GitHub, value))
}
