//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    shopify::ShopifyConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod shopify;

pub(crate) use observability::LogFormat;

/// QR code admin JSON API server configuration
#[derive(Debug, Parser)]
#[command(name = "qrcodes-json", about = "QR code admin JSON API server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shop Admin API and public URL settings.
    #[command(flatten)]
    pub shopify: ShopifyConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "qrcodes-json",
        "--database-url",
        "postgres://localhost/qrcodes",
        "--app-url",
        "https://qr.example.com",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(REQUIRED)?;

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8698");
        assert_eq!(config.database.database_max_connections, 10);
        assert_eq!(config.shopify.api_version, "2025-10");
        assert_eq!(config.observability.otel_service_name, "qrcodes-json");
        assert!(!config.observability.otel_enabled);

        Ok(())
    }
}
