use anyhow::{Context, Result};
use std::str::FromStr;
use tracing::info;

/// Runtime configuration, sourced from the process environment.
///
/// A `.env` file in the working directory is loaded first when present.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub telegram: TelegramConfig,

    pub omdb: OmdbConfig,

    pub database: DatabaseConfig,

    pub general: GeneralConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub token: String,

    /// Dump raw updates and lower the log level to `debug`.
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct OmdbConfig {
    pub api_key: String,

    pub base_url: String,

    pub timeout_seconds: u64,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://www.omdbapi.com/".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,

    pub port: u16,

    pub user: String,

    pub password: String,

    pub name: String,

    /// Full connection URL; takes precedence over the individual fields.
    pub url: Option<String>,

    pub max_connections: u32,

    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "cinemanager".to_string(),
            url: None,
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        )
    }
}

#[derive(Debug, Clone)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Address for the Prometheus scrape endpoint, e.g. `0.0.0.0:9000`.
    pub metrics_addr: Option<String>,

    pub loki_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from: {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to read .env file"),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
            config.telegram.token = token;
        }
        config.telegram.debug = get("DEBUG").is_some_and(|v| v == "true");

        if let Some(key) = get("OMDB_API_KEY") {
            config.omdb.api_key = key;
        }
        if let Some(url) = get("OMDB_BASE_URL") {
            config.omdb.base_url = url;
        }
        if let Some(timeout) = get("OMDB_TIMEOUT_SECONDS") {
            config.omdb.timeout_seconds = parse_var("OMDB_TIMEOUT_SECONDS", &timeout)?;
        }

        if let Some(host) = get("DB_HOST") {
            config.database.host = host;
        }
        if let Some(port) = get("DB_PORT") {
            config.database.port = parse_var("DB_PORT", &port)?;
        }
        if let Some(user) = get("DB_USER") {
            config.database.user = user;
        }
        if let Some(password) = get("DB_PASSWORD") {
            config.database.password = password;
        }
        if let Some(name) = get("DB_NAME") {
            config.database.name = name;
        }
        config.database.url = get("DATABASE_URL");
        if let Some(max) = get("DB_MAX_CONNECTIONS") {
            config.database.max_connections = parse_var("DB_MAX_CONNECTIONS", &max)?;
        }
        if let Some(min) = get("DB_MIN_CONNECTIONS") {
            config.database.min_connections = parse_var("DB_MIN_CONNECTIONS", &min)?;
        }

        config.general.log_level = match get("LOG_LEVEL") {
            Some(level) => level,
            None if config.telegram.debug => "debug".to_string(),
            None => GeneralConfig::default().log_level,
        };

        config.observability.metrics_addr = get("METRICS_ADDR");
        config.observability.loki_url = get("LOKI_URL");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            anyhow::bail!("TELEGRAM_BOT_TOKEN must be set");
        }

        if self.omdb.timeout_seconds == 0 {
            anyhow::bail!("OMDB_TIMEOUT_SECONDS must be > 0");
        }

        if self.database.max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be > 0");
        }

        if self.database.min_connections > self.database.max_connections {
            anyhow::bail!("DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS");
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {key}: {value:?}"))
}
