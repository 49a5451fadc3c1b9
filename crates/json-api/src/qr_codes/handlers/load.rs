//! Load QR Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use qrcodes_app::domain::qr_codes::target::QrCodeTarget;

use crate::{
    extensions::*,
    qr_codes::{errors::into_status_error, responses::QrCodeDetailsResponse},
    state::State,
};

/// Load QR Code Handler
///
/// `new` returns the starting values for a draft; a numeric id returns the
/// stored record with product metadata and its QR image.
#[endpoint(
    tags("qr_codes"),
    summary = "Load QR Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Draft or stored QR code"),
        (status_code = StatusCode::NOT_FOUND, description = "QR code not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed QR code id"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<QrCodeDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;
    let target = id
        .into_inner()
        .parse::<QrCodeTarget>()
        .or_400("QR code id must be \"new\" or a positive number")?;

    let loaded = state
        .app
        .qr_codes
        .load_qr_code(session, target)
        .await
        .map_err(into_status_error)?;

    Ok(Json(loaded.into()))
}
