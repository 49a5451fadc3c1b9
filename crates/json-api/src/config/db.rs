//! Database Config

use clap::Args;

/// `PostgreSQL` settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,
}
