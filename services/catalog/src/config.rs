use serde::Deserialize;

use cinema_auth_types::token::DEFAULT_TOKEN_TTL;
use cinema_core::config::Config;

/// Catalog service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HS256 signing secret. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 8080). Env var: `CATALOG_PORT`.
    #[serde(default = "default_port")]
    pub catalog_port: u16,
    /// Token lifetime in seconds (default 3600). Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Apply pending migrations on startup. Env var: `RUN_MIGRATIONS`.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL
}

fn default_run_migrations() -> bool {
    true
}

impl Config for CatalogConfig {}
