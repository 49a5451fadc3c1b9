//! Shopify Admin GraphQL client.

use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError, ProductImage, ProductSummary},
    domain::sessions::records::Session,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const SUPPLEMENT_QR_CODE_QUERY: &str = "query supplementQRCode($id: ID!) {
  product(id: $id) {
    title
    handle
    media(first: 1) {
      nodes {
        preview {
          image {
            altText
            url
          }
        }
      }
    }
  }
}";

/// Configuration for reaching a shop's Admin API.
#[derive(Debug, Clone)]
pub struct AdminApiConfig {
    /// Admin API version segment, e.g. `"2025-10"`.
    pub api_version: String,
}

/// HTTP client for the Admin GraphQL API, authenticated per shop session.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    config: AdminApiConfig,
    http: Client,
}

impl AdminApiClient {
    #[must_use]
    pub fn new(config: AdminApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn graphql_url(&self, session: &Session) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            session.shop, self.config.api_version
        )
    }

    fn product_request(&self, session: &Session, product_id: &str) -> Result<Request, CatalogError> {
        let body = serde_json::json!({
            "query": SUPPLEMENT_QR_CODE_QUERY,
            "variables": { "id": product_id },
        });

        Ok(self
            .http
            .post(self.graphql_url(session))
            .header(ACCESS_TOKEN_HEADER, &session.access_token)
            .json(&body)
            .build()?)
    }
}

fn parse_response(status: StatusCode, text: &str) -> Result<GraphqlResponse, CatalogError> {
    if !status.is_success() {
        return Err(CatalogError::UnexpectedResponse(format!(
            "product query failed with status {status}: {text}"
        )));
    }

    serde_json::from_str(text).map_err(|e| CatalogError::UnexpectedResponse(e.to_string()))
}

#[async_trait]
impl Catalog for AdminApiClient {
    async fn product(
        &self,
        session: &Session,
        product_id: &str,
    ) -> Result<Option<ProductSummary>, CatalogError> {
        let request = self.product_request(session, product_id)?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = parse_response(status, &text)?;

        debug!(shop = %session.shop, product_id, "fetched product metadata");

        parsed.into_summary()
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ProductData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    title: Option<String>,
    handle: Option<String>,
    media: Option<MediaConnection>,
}

#[derive(Debug, Deserialize)]
struct MediaConnection {
    nodes: Vec<MediaNode>,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    preview: Option<MediaPreview>,
}

#[derive(Debug, Deserialize)]
struct MediaPreview {
    image: Option<PreviewImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewImage {
    url: String,
    alt_text: Option<String>,
}

impl GraphqlResponse {
    fn into_summary(self) -> Result<Option<ProductSummary>, CatalogError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(CatalogError::Graphql(
                errors.into_iter().map(|error| error.message).collect(),
            ));
        }

        let Some(product) = self.data.and_then(|data| data.product) else {
            return Ok(None);
        };

        let image = product
            .media
            .and_then(|media| media.nodes.into_iter().next())
            .and_then(|node| node.preview)
            .and_then(|preview| preview.image)
            .map(|image| ProductImage {
                url: image.url,
                alt_text: image.alt_text,
            });

        Ok(Some(ProductSummary {
            title: product.title,
            handle: product.handle,
            image,
        }))
    }
}
