use crate::error::SourceError;
use crate::imdb::parser::parse_list_page;
use crate::traits::ListExtractor;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use watchsync_config::OperationLog;
use watchsync_models::SourceItem;

const LIST_FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Scrapes a public list page for title references
pub struct ImdbListExtractor {
    client: Client,
    log: OperationLog,
}

impl ImdbListExtractor {
    pub fn new(log: OperationLog) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(LIST_FETCH_TIMEOUT)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    reqwest::header::HeaderValue::from_static("en-US,en;q=0.9"),
                );
                headers
            })
            .build()
            .map_err(|e| SourceError::Setup(e.to_string()))?;

        Ok(Self { client, log })
    }

    async fn fetch_page(&self, page_url: &str) -> Result<String, SourceError> {
        let response = self.client.get(page_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                endpoint: "list page",
                status,
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched list page");
        Ok(body)
    }
}

#[async_trait]
impl ListExtractor for ImdbListExtractor {
    async fn extract(&self, page_url: &str) -> Vec<SourceItem> {
        self.log.info(format!("Fetching list from: {}", page_url));

        let html = match self.fetch_page(page_url).await {
            Ok(html) => html,
            Err(e) => {
                self.log.error(format!("Error fetching list: {}", e));
                return Vec::new();
            }
        };

        let items = parse_list_page(&html);
        for item in &items {
            self.log.info(format!("Found: {} ({})", item.title, item.external_id));
        }

        // An empty result is reported once, by the caller
        self.log.success(format!("Successfully found {} items from list", items.len()));
        items
    }
}
