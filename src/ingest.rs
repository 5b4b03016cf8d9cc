//! Turning a DIY project web page into a catalog entry.
//!
//! The page is fetched by a [`PageCrawler`], structured by a
//! [`ProjectExtractor`] and stored together with its steps.

use async_trait::async_trait;
use model::entities::diy_project;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{self, NewProject, NewStep};

pub mod apify;
pub mod openai;

pub use apify::ApifyCrawler;
pub use openai::OpenAiExtractor;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Crawler failed: {0}")]
    Crawler(String),
    #[error("Extractor failed: {0}")]
    Extractor(String),
    #[error("Extractor returned malformed project data: {0}")]
    MalformedExtraction(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Fetches the readable text of a page.
#[async_trait]
pub trait PageCrawler: Send + Sync {
    /// `None` when the crawl produced no content.
    async fn crawl(&self, url: &str) -> Result<Option<String>, IngestError>;
}

/// Structures page text into a project.
#[async_trait]
pub trait ProjectExtractor: Send + Sync {
    async fn extract(&self, page_text: &str) -> Result<ExtractedProject, IngestError>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedStep {
    #[serde(default)]
    pub step_number: Option<i32>,
    #[serde(default)]
    pub instruction_text: String,
}

/// Project data as returned by the extractor. Everything but the lists is
/// optional; the model reports missing values as null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avg_price: Option<f64>,
    /// Ignored, the stored count is derived from `steps`.
    #[serde(default)]
    pub step_count: Option<i64>,
    #[serde(default)]
    pub estimated_time_minutes: Option<i64>,
    #[serde(default)]
    pub is_rental_safe: Option<bool>,
    #[serde(default, alias = "materials")]
    pub materials_json: Vec<String>,
    #[serde(default, alias = "tools")]
    pub tools_json: Vec<String>,
    #[serde(default)]
    pub steps: Vec<ExtractedStep>,
}

impl ExtractedProject {
    /// Parses the extractor's raw JSON answer.
    pub fn from_json(raw: &str) -> Result<Self, IngestError> {
        serde_json::from_str(raw.trim()).map_err(|e| IngestError::MalformedExtraction(e.to_string()))
    }

    /// Normalizes into a storable project.
    ///
    /// Drilling is assumed exactly when the project is not rental safe, and an
    /// unknown rental safety counts as not safe. Steps without a number are
    /// numbered by position.
    pub fn into_new_project(self) -> NewProject {
        let is_rental_safe = self.is_rental_safe.unwrap_or(false);

        let steps = self
            .steps
            .into_iter()
            .filter(|step| !step.instruction_text.trim().is_empty())
            .zip(1..)
            .map(|(step, position)| NewStep {
                step_number: step.step_number.unwrap_or(position),
                instruction_text: step.instruction_text.trim().to_string(),
            })
            .collect();

        NewProject {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            description: self.description.unwrap_or_default(),
            avg_price: self
                .avg_price
                .and_then(Decimal::from_f64_retain)
                .map(|price| price.round_dp(2)),
            estimated_time_minutes: self
                .estimated_time_minutes
                .filter(|minutes| *minutes > 0)
                .and_then(|minutes| i32::try_from(minutes).ok()),
            is_rental_safe,
            requires_drilling: !is_rental_safe,
            materials: clean_list(self.materials_json),
            tools: clean_list(self.tools_json),
            steps,
        }
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// The crawl returned nothing; nothing was stored.
    NoContent,
    Stored(diy_project::Model),
}

/// Crawls `url`, extracts a project from the page and stores it with its
/// steps in one transaction.
#[instrument(skip(db, crawler, extractor))]
pub async fn ingest_url(
    db: &DatabaseConnection,
    crawler: &dyn PageCrawler,
    extractor: &dyn ProjectExtractor,
    url: &str,
) -> Result<IngestOutcome, IngestError> {
    let page_text = match crawler.crawl(url).await? {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("Crawl of {} returned no content", url);
            return Ok(IngestOutcome::NoContent);
        }
    };
    info!("Scraped {} chars, extracting project", page_text.len());

    let extracted = extractor.extract(&page_text).await?;
    if let Some(reported) = extracted.step_count {
        debug!("Extractor reported {} steps, found {}", reported, extracted.steps.len());
    }
    let project = extracted.into_new_project();

    let txn = db.begin().await?;
    let stored = catalog::insert_project(&txn, project).await?;
    txn.commit().await?;

    info!("{} is now in the catalog", stored.title);
    Ok(IngestOutcome::Stored(stored))
}
