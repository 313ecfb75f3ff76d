use crate::Result;
use crate::scan::clients::PlatformClient;
use crate::scan::{Platform, RawRecord};
use async_trait::async_trait;
use ohno::EnrichableExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

const LOG_TARGET: &str = "    notion";
const SEARCH_URL: &str = "https://api.notion.com/v1/search";

/// Pinned API revision; Notion rejects requests without one.
const NOTION_VERSION: &str = "2022-06-28";
const SEARCH_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
    has_more: bool,
    next_cursor: Option<String>,
}

/// Notion client: enumerates every page and database the integration can see.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder().user_agent("platform-inventory").build()?,
            token: token.to_owned(),
        })
    }

    async fn search_page(&self, object: &str, cursor: Option<&str>) -> Result<SearchResponse> {
        let mut body = json!({
            "filter": {"property": "object", "value": object},
            "page_size": SEARCH_PAGE_SIZE,
        });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_owned());
        }

        let response = self
            .client
            .post(SEARCH_URL)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Run one full search pass for an object kind, following cursors. A failure on the very
    /// first request of the first pass is reported by the caller as total enumeration failure;
    /// any later failure becomes a mid-stream record error.
    async fn enumerate_kind(&self, object: &str, records: &mut Vec<Result<RawRecord>>, limit: usize, first_pass: bool) -> Result<()> {
        let mut cursor: Option<String> = None;

        loop {
            if records.len() >= limit {
                return Ok(());
            }

            let response = match self.search_page(object, cursor.as_deref()).await {
                Ok(response) => response,
                Err(e) => {
                    let e = e.enrich_with(|| format!("could not search Notion for '{object}' objects"));
                    if first_pass && cursor.is_none() && records.is_empty() {
                        return Err(e);
                    }
                    log::warn!(target: LOG_TARGET, "Notion enumeration failed mid-stream: {e:#}");
                    records.push(Err(e));
                    return Ok(());
                }
            };

            for result in response.results {
                if records.len() >= limit {
                    return Ok(());
                }
                records.push(Ok(RawRecord::new(Platform::Notion, result)));
            }

            if !response.has_more || response.next_cursor.is_none() {
                return Ok(());
            }
            cursor = response.next_cursor;
        }
    }
}

#[async_trait]
impl PlatformClient for NotionClient {
    fn platform(&self) -> Platform {
        Platform::Notion
    }

    async fn list_resources(&self, limit: Option<usize>) -> Result<Vec<Result<RawRecord>>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut records = Vec::new();

        log::info!(target: LOG_TARGET, "Enumerating Notion pages and databases");

        self.enumerate_kind("page", &mut records, limit, true).await?;
        self.enumerate_kind("database", &mut records, limit, false).await?;

        log::info!(target: LOG_TARGET, "Enumerated {} Notion record(s)", records.len());
        Ok(records)
    }
}
