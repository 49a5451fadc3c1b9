//! Session Records

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shop Domain
///
/// The `*.myshopify.com` host that owns records and receives Admin API calls.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopDomain(String);

impl ShopDomain {
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ShopDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl Display for ShopDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Session Record
#[derive(Clone)]
pub struct SessionRecord {
    /// Unique session identifier.
    pub uuid: Uuid,

    /// Shop the session was issued for.
    pub shop: ShopDomain,

    /// Offline Admin API access token for the shop.
    pub access_token: String,

    /// Session creation timestamp.
    pub created_at: Timestamp,

    /// Expiry, when the session is not permanent.
    pub expires_at: Option<Timestamp>,
}

impl Debug for SessionRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SessionRecord")
            .field("uuid", &self.uuid)
            .field("shop", &self.shop)
            .field("access_token", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Authenticated Session
///
/// What a request handler needs to act on behalf of a shop.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub shop: ShopDomain,
    pub access_token: String,
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("shop", &self.shop)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            shop: record.shop,
            access_token: record.access_token,
        }
    }
}
