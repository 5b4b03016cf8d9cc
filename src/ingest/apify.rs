//! Apify website content crawler client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{IngestError, PageCrawler};

const APIFY_BASE_URL: &str = "https://api.apify.com/v2";
const CRAWLER_ACTOR: &str = "apify~website-content-crawler";
/// A synchronous actor run waits for the whole crawl.
const REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartUrl<'a> {
    url: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CrawlerInput<'a> {
    start_urls: Vec<StartUrl<'a>>,
    max_crawl_pages: u32,
}

#[derive(Deserialize)]
struct DatasetItem {
    #[serde(default)]
    text: Option<String>,
}

/// Runs the crawler actor on a single page and returns its text.
#[derive(Clone)]
pub struct ApifyCrawler {
    client: Client,
    token: String,
    base_url: String,
}

impl ApifyCrawler {
    pub fn new(token: impl Into<String>) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| IngestError::Crawler(e.to_string()))?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: APIFY_BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl PageCrawler for ApifyCrawler {
    async fn crawl(&self, url: &str) -> Result<Option<String>, IngestError> {
        let endpoint = format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            self.base_url, CRAWLER_ACTOR
        );
        let input = CrawlerInput {
            start_urls: vec![StartUrl { url }],
            max_crawl_pages: 1,
        };

        debug!("Starting crawler actor for {}", url);
        let response = self
            .client
            .post(&endpoint)
            .query(&[("token", self.token.as_str())])
            .json(&input)
            .send()
            .await
            .map_err(|e| IngestError::Crawler(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IngestError::Crawler(format!(
                "crawler run failed: {}",
                response.status()
            )));
        }

        let items: Vec<DatasetItem> = response
            .json()
            .await
            .map_err(|e| IngestError::Crawler(e.to_string()))?;
        debug!("Crawler returned {} dataset items", items.len());

        Ok(items.into_iter().next().and_then(|item| item.text))
    }
}
