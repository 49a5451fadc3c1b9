//! QR Code Errors

use salvo::http::StatusError;
use tracing::error;

use qrcodes_app::domain::qr_codes::QrCodesServiceError;

pub(crate) fn into_status_error(error: QrCodesServiceError) -> StatusError {
    match error {
        QrCodesServiceError::NotFound => StatusError::not_found().brief("QR code not found"),
        QrCodesServiceError::AlreadyExists => {
            StatusError::conflict().brief("QR code already exists")
        }
        QrCodesServiceError::InvalidReference
        | QrCodesServiceError::MissingRequiredData
        | QrCodesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid QR code payload")
        }
        QrCodesServiceError::Sql(source) => {
            error!("QR code storage failed: {source}");

            StatusError::internal_server_error()
        }
        QrCodesServiceError::Catalog(source) => {
            error!("product lookup failed: {source}");

            StatusError::internal_server_error()
        }
        QrCodesServiceError::Image(source) => {
            error!("QR image rendering failed: {source}");

            StatusError::internal_server_error()
        }
        QrCodesServiceError::UnrecognizedVariant(variant) => {
            error!("cannot build a cart link for variant {variant}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use qrcodes_app::catalog::CatalogError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (QrCodesServiceError::NotFound, StatusCode::NOT_FOUND),
            (QrCodesServiceError::AlreadyExists, StatusCode::CONFLICT),
            (QrCodesServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (
                QrCodesServiceError::Catalog(CatalogError::UnexpectedResponse("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                QrCodesServiceError::UnrecognizedVariant("gid://x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
