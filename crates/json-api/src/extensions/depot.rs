//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use qrcodes_app::domain::sessions::records::Session;

const SESSION_DEPOT_KEY: &str = "session";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session(&mut self, session: Session);

    /// The session stored by the auth middleware.
    fn session_or_401(&self) -> Result<&Session, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session(&mut self, session: Session) {
        self.insert(SESSION_DEPOT_KEY, session);
    }

    fn session_or_401(&self) -> Result<&Session, StatusError> {
        self.get::<Session>(SESSION_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
