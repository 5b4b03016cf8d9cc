use anyhow::{Context, Result};
use tracing::info;

use crate::catalog;
use crate::config::{AppConfig, connect_database};

pub async fn seed_projects(config: &AppConfig) -> Result<()> {
    let db = connect_database(&config.database_url).await?;

    let report = catalog::seed_projects(&db)
        .await
        .context("Seeding projects failed, nothing was stored")?;

    info!(
        "Seeding done: {} created, {} already present",
        report.created.len(),
        report.skipped.len()
    );
    Ok(())
}

pub async fn load_assets(config: &AppConfig) -> Result<()> {
    let db = connect_database(&config.database_url).await?;

    let added = catalog::load_stored_assets(&db)
        .await
        .context("Loading stored assets failed")?;

    info!("Assets loaded successfully ({} new)", added);
    Ok(())
}
