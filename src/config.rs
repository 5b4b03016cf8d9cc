use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend};
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;
use crate::session::SessionStore;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://homekeep.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_IDLE_SECS: i64 = 86_400;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Runtime settings. Built-in defaults, overridden by `.env` and the process
/// environment, overridden again by command-line flags where a command has them.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub session_idle_secs: u64,
    pub admin_token: Option<String>,
    pub apify_crawler_key: Option<String>,
    pub openai_key: Option<String>,
    pub openai_model: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("session_idle_secs", DEFAULT_SESSION_IDLE_SECS)?
            .set_default("openai_model", DEFAULT_OPENAI_MODEL)?
            .add_source(config::Environment::default())
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        // An empty ADMIN_TOKEN= line means "disabled", not "the empty password".
        config.admin_token = config.admin_token.filter(|token| !token.trim().is_empty());
        Ok(config)
    }
}

/// Connects to the database. SQLite connections get foreign keys switched on
/// so cascading deletes apply.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
        debug!("Enabled SQLite foreign keys");
    }

    Ok(db)
}

/// Initialize application state from the loaded configuration
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    let db = connect_database(&config.database_url).await?;

    let sessions = SessionStore::new(Duration::from_secs(config.session_idle_secs));
    if config.admin_token.is_none() {
        info!("ADMIN_TOKEN not set, admin routes are disabled");
    }

    Ok(AppState {
        db,
        sessions,
        admin_token: config.admin_token.clone(),
    })
}
