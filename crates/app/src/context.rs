//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    catalog::{AdminApiClient, AdminApiConfig},
    database,
    domain::{
        qr_codes::{QrCodeRecordService, QrCodesService},
        sessions::{PgSessionsService, SessionsService},
    },
    images::QrImageRenderer,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub qr_codes: Arc<dyn QrCodesService>,
    pub sessions: Arc<dyn SessionsService>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// `app_url` is the public base URL encoded into QR images.
    /// `max_connections` caps the database pool.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        admin_api: AdminApiConfig,
        app_url: &str,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self {
            qr_codes: Arc::new(QrCodeRecordService::new(
                pool.clone(),
                Arc::new(AdminApiClient::new(admin_api)),
                QrImageRenderer::new(app_url),
            )),
            sessions: Arc::new(PgSessionsService::new(pool)),
        })
    }
}
