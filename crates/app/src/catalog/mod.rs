//! Product Catalog

use async_trait::async_trait;
use mockall::automock;

use crate::domain::sessions::records::Session;

mod admin_api;
mod errors;
mod models;

pub use admin_api::{AdminApiClient, AdminApiConfig};
pub use errors::CatalogError;
pub use models::{ProductImage, ProductSummary};

/// Read access to the shop's product catalog.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Title, handle and first image of a product, or `None` when the shop
    /// no longer has it.
    async fn product(
        &self,
        session: &Session,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError>;
}
