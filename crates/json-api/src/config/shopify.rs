//! Shopify Config

use clap::Args;

/// Admin API and public app settings.
#[derive(Debug, Args)]
pub struct ShopifyConfig {
    /// Public base URL of this app, encoded into QR images
    #[arg(long = "app-url", env = "SHOPIFY_APP_URL")]
    pub app_url: String,

    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2025-10")]
    pub api_version: String,
}
