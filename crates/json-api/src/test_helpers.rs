//! Test helpers.

use std::sync::Arc;

use qrcodes_app::{
    context::AppContext,
    domain::{
        qr_codes::MockQrCodesService,
        sessions::{
            MockSessionsService,
            records::{Session, ShopDomain},
        },
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SHOP: &str = "test-shop.myshopify.com";

pub(crate) fn test_session() -> Session {
    Session {
        shop: ShopDomain::new(TEST_SHOP),
        access_token: "shpat_test".to_string(),
    }
}

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session(test_session());
    ctrl.call_next(req, depot, res).await;
}

fn strict_sessions_mock() -> MockSessionsService {
    let mut sessions = MockSessionsService::new();

    sessions.expect_authenticate_bearer().never();

    sessions
}

fn strict_qr_codes_mock() -> MockQrCodesService {
    let mut qr_codes = MockQrCodesService::new();

    qr_codes.expect_load_qr_code().never();
    qr_codes.expect_list_qr_codes().never();
    qr_codes.expect_save_qr_code().never();
    qr_codes.expect_delete_qr_code().never();
    qr_codes.expect_record_scan().never();

    qr_codes
}

pub(crate) fn state_with(qr_codes: MockQrCodesService, sessions: MockSessionsService) -> Arc<State> {
    State::from_app_context(AppContext {
        qr_codes: Arc::new(qr_codes),
        sessions: Arc::new(sessions),
    })
}

pub(crate) fn state_with_qr_codes(qr_codes: MockQrCodesService) -> Arc<State> {
    state_with(qr_codes, strict_sessions_mock())
}

pub(crate) fn state_with_sessions(sessions: MockSessionsService) -> Arc<State> {
    state_with(strict_qr_codes_mock(), sessions)
}

pub(crate) fn qr_codes_service(qr_codes: MockQrCodesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_qr_codes(qr_codes)))
            .hoop(inject_session)
            .push(route),
    )
}
