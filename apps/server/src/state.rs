//! Shared application state.

use std::sync::Arc;

use latte_db::{Database, DbConfig, DbResult};

use crate::config::ServerConfig;

/// State handed to every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    /// Opens (and migrates) the database named by the configuration.
    pub async fn connect(config: ServerConfig) -> DbResult<Self> {
        let db_config =
            DbConfig::new(&config.database_path).max_connections(config.db_max_connections);
        let db = Database::new(db_config).await?;

        Ok(AppState::new(db, config))
    }
}
