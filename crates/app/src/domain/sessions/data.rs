//! Session Data

use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::sessions::records::ShopDomain;

/// New Session Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub uuid: Uuid,
    pub shop: ShopDomain,
    pub access_token: String,

    /// Raw bearer token; only its hash is persisted.
    pub bearer_token: String,
    pub expires_at: Option<Timestamp>,
}
