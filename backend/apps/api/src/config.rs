//! Process Configuration
//!
//! Read once from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use learning::LearningConfig;
use platform::password::HashingCost;
use platform::token::TokenConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub token: TokenConfig,
    pub hashing: HashingCost,
    pub learning: LearningConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let defaults = HashingCost::default();
        let hashing = HashingCost {
            memory_kib: parse_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            database_url,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: parse_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?,
            frontend_origins,
            token: token_config()?,
            hashing,
            learning: LearningConfig {
                enforce_ownership: parse_or("VOCABULARY_ENFORCE_OWNERSHIP", true)?,
            },
        })
    }
}

fn token_config() -> anyhow::Result<TokenConfig> {
    let mut config = match env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => TokenConfig {
            secret: secret.into_bytes(),
            ..TokenConfig::default()
        },
        Ok(_) => bail!("JWT_SECRET must be at least 32 bytes"),
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
            TokenConfig::with_random_secret()
        }
        Err(_) => bail!("JWT_SECRET must be set in production"),
    };

    if let Ok(issuer) = env::var("JWT_ISSUER") {
        config.issuer = issuer;
    }
    if let Ok(audience) = env::var("JWT_AUDIENCE") {
        config.audience = audience;
    }
    let minutes: u64 = parse_or("JWT_EXPIRES_IN_MINUTES", 60)?;
    if minutes == 0 {
        bail!("JWT_EXPIRES_IN_MINUTES must be positive");
    }
    config.ttl = Duration::from_secs(minutes * 60);

    Ok(config)
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
