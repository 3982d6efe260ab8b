//! Server configuration module.
//!
//! Settings are layered: built-in defaults, then an optional `latte.toml`
//! (path overridable with `LATTE_CONFIG`), then environment variables.
//! `main` loads a `.env` file into the environment first.
//!
//! | Variable             | Default     |
//! |----------------------|-------------|
//! | `PORT`               | `3000`      |
//! | `DATABASE_PATH`      | `latte.db`  |
//! | `DB_MAX_CONNECTIONS` | `5`         |
//! | `ADMIN_TOKEN`        | unset       |
//! | `STATIC_DIR`         | `public`    |

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default config file, read if present.
pub const DEFAULT_CONFIG_FILE: &str = "latte.toml";

/// Server configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Shared secret for the stats and dashboard endpoints.
    /// `None` locks those endpoints. Compared byte for byte; a `?token=`
    /// query value is percent-decoded first.
    #[serde(skip_serializing)]
    pub admin_token: Option<String>,

    /// Directory served for every path no route matches
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            database_path: PathBuf::from("latte.db"),
            db_max_connections: 5,
            admin_token: None,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let file = env::var("LATTE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&file).required(false))
            // Values stay strings; numeric fields are parsed on read so that
            // secrets like `0123` are not reformatted.
            .add_source(config::Environment::default())
            .build()?;

        let config = Self::from_settings(&settings)?;

        if config.admin_token.is_none() {
            warn!("ADMIN_TOKEN is not set; /api/stats and /api/dashboard will reject every request");
        }

        Ok(config)
    }

    /// Builds the configuration from already-layered settings.
    pub fn from_settings(settings: &config::Config) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        let config = ServerConfig {
            port: read(settings, "port", "PORT", defaults.port)?,
            database_path: read(settings, "database_path", "DATABASE_PATH", defaults.database_path)?,
            db_max_connections: read(
                settings,
                "db_max_connections",
                "DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            admin_token: read::<Option<String>>(settings, "admin_token", "ADMIN_TOKEN", None)?
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            static_dir: read(settings, "static_dir", "STATIC_DIR", defaults.static_dir)?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }
}

/// Reads one key, falling back to `default` when it is absent.
fn read<T: DeserializeOwned>(
    settings: &config::Config,
    key: &str,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match settings.get::<T>(key) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => Ok(default),
        Err(_) => Err(ConfigError::InvalidValue(var.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),
}
