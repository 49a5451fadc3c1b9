//! QR codes service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{catalog::CatalogError, images::QrImageError};

#[derive(Debug, Error)]
pub enum QrCodesServiceError {
    #[error("QR code already exists")]
    AlreadyExists,

    #[error("QR code not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("catalog lookup failed")]
    Catalog(#[from] CatalogError),

    #[error("QR image rendering failed")]
    Image(#[from] QrImageError),

    #[error("unrecognized product variant id \"{0}\"")]
    UnrecognizedVariant(String),
}

impl From<Error> for QrCodesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            QrCodesServiceError::from(Error::RowNotFound),
            QrCodesServiceError::NotFound
        ));
    }

    #[test]
    fn pool_errors_stay_sql() {
        assert!(matches!(
            QrCodesServiceError::from(Error::PoolTimedOut),
            QrCodesServiceError::Sql(_)
        ));
    }
}
