use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{AppConfig, connect_database};
use crate::ingest::{ApifyCrawler, IngestOutcome, OpenAiExtractor, ingest_url};

pub async fn ingest(config: &AppConfig, url: &str) -> Result<()> {
    let crawler_key = config
        .apify_crawler_key
        .as_deref()
        .context("APIFY_CRAWLER_KEY is not set")?;
    let openai_key = config
        .openai_key
        .as_deref()
        .context("OPENAI_KEY is not set")?;

    let db = connect_database(&config.database_url).await?;
    let crawler = ApifyCrawler::new(crawler_key)?;
    let extractor = OpenAiExtractor::new(openai_key, config.openai_model.as_str())?;

    info!("Ingesting {}", url);
    match ingest_url(&db, &crawler, &extractor, url)
        .await
        .with_context(|| format!("Ingesting {} failed", url))?
    {
        IngestOutcome::NoContent => warn!("No content found at {}, nothing stored", url),
        IngestOutcome::Stored(project) => {
            info!("Stored project {} '{}'", project.id, project.title)
        }
    }
    Ok(())
}
