//! Sessions service.

use async_trait::async_trait;
use mockall::automock;
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::sessions::{
    data::NewSession,
    errors::SessionsServiceError,
    records::{Session, SessionRecord},
    repository::PgSessionsRepository,
};

#[derive(Debug, Clone)]
pub struct PgSessionsService {
    repository: PgSessionsRepository,
}

impl PgSessionsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgSessionsRepository::new(pool),
        }
    }

    /// Persist a session for a shop, keyed by the hash of its bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error when the insert fails or the token is already registered.
    pub async fn create_session(
        &self,
        session: NewSession,
    ) -> Result<SessionRecord, SessionsServiceError> {
        self.repository
            .create_session(&session, &hash_token(&session.bearer_token))
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl SessionsService for PgSessionsService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, SessionsServiceError> {
        let record = self
            .repository
            .find_session_by_token_hash(&hash_token(bearer_token))
            .await?
            .ok_or(SessionsServiceError::NotFound)?;

        debug!(shop = %record.shop, "authenticated session");

        Ok(record.into())
    }
}

#[automock]
#[async_trait]
/// Session resolution for incoming admin requests.
pub trait SessionsService: Send + Sync {
    /// Resolves the active session that owns the given bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Session, SessionsServiceError>;
}

/// Bearer token prefix, so leaked tokens are recognisable.
pub const BEARER_TOKEN_PREFIX: &str = "qrs_";

const BEARER_TOKEN_SECRET_BYTES: usize = 32;

/// Mint a random bearer token for a new session.
pub fn generate_bearer_token() -> String {
    let mut secret = [0_u8; BEARER_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    secret
        .iter()
        .fold(String::from(BEARER_TOKEN_PREFIX), |mut token, byte| {
            token.push_str(&format!("{byte:02x}"));
            token
        })
}

pub(crate) fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
