use anyhow::Context;
use std::str::FromStr;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "book_manager=info,tower_http=info";

#[derive(Debug)]
pub struct Config {
    database_url: String,
    database_max_connections: u32,
    server_port: u16,
    log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = load_env("DATABASE_URL")?;
        let database_max_connections =
            load_env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let server_port = load_env("SERVER_PORT")?;
        let log_level = load_env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL.to_string())?;
        Ok(Self {
            database_url,
            database_max_connections,
            server_port,
            log_level,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.server_port
    }

    #[must_use]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

fn load_env<T>(key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val =
        std::env::var(key).with_context(|| format!("Failed to load environment variable {key}"))?;
    parse_env(key, &val)
}

fn load_env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(val) => parse_env(key, &val),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to load environment variable {key}"))
        }
    }
}

fn parse_env<T>(key: &str, val: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    val.parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}
