//! QR Code Scan Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::PathParam, prelude::*};
use tracing::debug;

use qrcodes_app::domain::qr_codes::records::QrCodeId;

use crate::{
    extensions::*, observability::record_scan, qr_codes::errors::into_status_error, state::State,
};

/// QR Code Scan Handler
///
/// Counts the scan and redirects the customer to the product page or a
/// prefilled cart. Public: the QR image encodes this URL.
#[endpoint(
    tags("qr_codes"),
    summary = "Scan QR Code",
    responses(
        (status_code = StatusCode::FOUND, description = "Redirect to the destination"),
        (status_code = StatusCode::NOT_FOUND, description = "QR code not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed QR code id"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = id
        .into_inner()
        .parse::<QrCodeId>()
        .or_400("QR code id must be a number")?;

    let destination = state
        .app
        .qr_codes
        .record_scan(id)
        .await
        .map_err(into_status_error)?;

    record_scan();

    debug!(%id, %destination, "redirecting scan");

    res.add_header(LOCATION, destination, true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::FOUND);

    Ok(())
}
