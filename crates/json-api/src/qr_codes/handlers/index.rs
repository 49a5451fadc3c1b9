//! QR Code Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    qr_codes::{errors::into_status_error, responses::QrCodesResponse},
    state::State,
};

/// QR Code Index Handler
///
/// Lists the shop's QR codes, newest first, with product metadata.
#[endpoint(
    tags("qr_codes"),
    summary = "List QR Codes",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<QrCodesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let qr_codes = state
        .app
        .qr_codes
        .list_qr_codes(session)
        .await
        .map_err(into_status_error)?;

    Ok(Json(QrCodesResponse {
        qr_codes: qr_codes.into_iter().map(Into::into).collect(),
    }))
}
