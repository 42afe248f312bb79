use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use tracing::info;

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub cors_origin: Option<String>,
    pub store_backend: StoreBackend,
    pub mongo_uri: String,
    pub db_name: String,
    pub session_secret: String,
    pub store_timeout: Duration,
    pub max_write_attempts: u32,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("SESSION_SECRET must be set".to_string()))?;

        let max_write_attempts: u32 = try_load(&lookup, "MAX_WRITE_ATTEMPTS", "8")?;
        if max_write_attempts == 0 {
            return Err(AppError::Config("MAX_WRITE_ATTEMPTS must be at least 1".to_string()));
        }

        Ok(Self {
            server_addr: try_load(&lookup, "SERVER_ADDR", "0.0.0.0:5000")?,
            cors_origin: lookup("CORS_ORIGIN"),
            store_backend: try_load(&lookup, "STORE_BACKEND", "mongo")?,
            mongo_uri: try_load(&lookup, "MONGO_URI", "mongodb://localhost:27017")?,
            db_name: try_load(&lookup, "DB_NAME", "amenses")?,
            session_secret,
            store_timeout: Duration::from_millis(try_load(&lookup, "STORE_TIMEOUT_MS", "5000")?),
            max_write_attempts,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value: {e}")))
}
