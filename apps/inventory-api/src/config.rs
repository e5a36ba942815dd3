//! Configuration for Inventory API

use axum_helpers::{create_cors_layer, create_permissive_cors_layer};
use core_config::{AppInfo, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;
use std::time::Duration;
use tower_http::cors::CorsLayer;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    /// Backoff for the startup connection
    pub connect_retry: RetryConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving
    pub run_migrations: bool,
    pub cors_origins: Vec<String>,
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Environment variables, on top of the database and server ones:
    /// - `RUN_MIGRATIONS` (false)
    /// - `CORS_ALLOWED_ORIGIN`: comma separated origins
    /// - `SHUTDOWN_TIMEOUT_SECS` (30)
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let connect_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let cors_origins = env_or_default("CORS_ALLOWED_ORIGIN", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            app: app_info!(),
            database,
            connect_retry,
            server,
            environment,
            run_migrations: env_parse("RUN_MIGRATIONS", "false")?,
            cors_origins,
            shutdown_timeout: Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?),
        })
    }

    /// CORS restricted to `cors_origins`; permissive when none are configured,
    /// which production refuses.
    pub fn cors_layer(&self) -> eyre::Result<CorsLayer> {
        if self.cors_origins.is_empty() {
            if self.environment.is_production() {
                eyre::bail!("CORS_ALLOWED_ORIGIN must be set in production");
            }
            return Ok(create_permissive_cors_layer());
        }

        create_cors_layer(&self.cors_origins)
            .map_err(|origin| eyre::eyre!("Invalid CORS origin: {:?}", origin))
    }
}
