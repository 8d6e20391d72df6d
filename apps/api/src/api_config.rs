use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;
use himig_core::AppError;
use tracing_subscriber::EnvFilter;


const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;
const DEFAULT_GENERATION_DELAY_MS: u64 = 5_000;
const DEFAULT_GENERATION_FAILURE_RATE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStoreConfig {
    InMemory,
    Redis,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub identity_header: HeaderName,
    pub database_url: Option<String>,
    pub rate_limit_store: RateLimitStoreConfig,
    pub redis_url: Option<String>,
    pub rate_limit_sweep_interval: Duration,
    pub generation_delay: Duration,
    pub generation_failure_rate: f64,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", optional("API_PORT"), 3001_u16)?;
        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let identity_header = optional("IDENTITY_HEADER").unwrap_or_else(|| "x-user-id".to_owned());
        let identity_header = HeaderName::from_str(identity_header.trim()).map_err(|error| {
            AppError::Validation(format!("invalid IDENTITY_HEADER '{identity_header}': {error}"))
        })?;

        let database_url = optional("DATABASE_URL");
        let redis_url = optional("REDIS_URL");

        let rate_limit_store = match optional("RATE_LIMIT_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => RateLimitStoreConfig::InMemory,
            "redis" => RateLimitStoreConfig::Redis,
            other => {
                return Err(AppError::Validation(format!(
                    "RATE_LIMIT_STORE must be either 'memory' or 'redis', got '{other}'"
                )));
            }
        };
        if rate_limit_store == RateLimitStoreConfig::Redis && redis_url.is_none() {
            return Err(AppError::Validation(
                "REDIS_URL is required when RATE_LIMIT_STORE=redis".to_owned(),
            ));
        }

        let sweep_seconds = parse_or(
            "RATE_LIMIT_SWEEP_INTERVAL_SECONDS",
            optional("RATE_LIMIT_SWEEP_INTERVAL_SECONDS"),
            DEFAULT_SWEEP_INTERVAL_SECONDS,
        )?;
        if sweep_seconds == 0 {
            return Err(AppError::Validation(
                "RATE_LIMIT_SWEEP_INTERVAL_SECONDS must be greater than zero".to_owned(),
            ));
        }

        let generation_delay_ms = parse_or(
            "GENERATION_DELAY_MS",
            optional("GENERATION_DELAY_MS"),
            DEFAULT_GENERATION_DELAY_MS,
        )?;

        let generation_failure_rate = parse_or(
            "GENERATION_FAILURE_RATE",
            optional("GENERATION_FAILURE_RATE"),
            DEFAULT_GENERATION_FAILURE_RATE,
        )?;
        if !(0.0..=1.0).contains(&generation_failure_rate) {
            return Err(AppError::Validation(format!(
                "GENERATION_FAILURE_RATE must be between 0 and 1, got {generation_failure_rate}"
            )));
        }

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            identity_header,
            database_url,
            rate_limit_store,
            redis_url,
            rate_limit_sweep_interval: Duration::from_secs(sweep_seconds),
            generation_delay: Duration::from_millis(generation_delay_ms),
            generation_failure_rate,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
        None => Ok(default),
    }
}
