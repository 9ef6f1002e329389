use std::env;

use anyhow::Context;

use remaster_core::batch::DEFAULT_SAVE_DELAY_MS;

#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    pub server_host: String,
    pub server_port: u16,

    // Database settings
    pub database_url: Option<String>,

    // Redis settings
    pub redis_url: Option<String>,

    /// Base URL edit links are built against.
    pub public_base_url: String,

    /// Delay handed to the client bridge, in milliseconds.
    pub save_delay_ms: u64,

    // Development settings
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            database_url: env::var("DATABASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),

            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            save_delay_ms: env::var("SAVE_DELAY_MS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_SAVE_DELAY_MS),

            dev_mode: env::var("DEV_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set (or enable DEV_MODE)")
    }

    pub fn require_redis_url(&self) -> anyhow::Result<&str> {
        self.redis_url
            .as_deref()
            .context("REDIS_URL must be set (or enable DEV_MODE)")
    }
}
