use thiserror::Error;

/// Errors that can occur when querying the Admin API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Admin API returned a non-2xx response.
    #[error("unexpected response from Admin API: {0}")]
    UnexpectedResponse(String),

    /// The query ran but reported errors.
    #[error("Admin API query failed: {}", .0.join("; "))]
    Graphql(Vec<String>),
}
