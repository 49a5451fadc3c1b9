//! App Router

use salvo::Router;

use crate::{auth, qr_codes};

/// QR code routes. Scans are public; everything else needs a session.
pub(crate) fn app_router() -> Router {
    Router::with_path("qrcodes")
        .push(Router::with_path("{id}/scan").get(qr_codes::scan::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .get(qr_codes::index::handler)
                .push(
                    Router::with_path("{id}")
                        .get(qr_codes::load::handler)
                        .post(qr_codes::action::handler),
                ),
        )
}
