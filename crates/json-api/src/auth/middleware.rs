//! Auth middleware.

use std::sync::Arc;

use qrcodes_app::domain::sessions::SessionsServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve the bearer token to a shop session or answer 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);

            return;
        }
    };

    let session = match state.app.sessions.authenticate_bearer(token).await {
        Ok(session) => session,
        Err(SessionsServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid session token"));

            return;
        }
        Err(source @ (SessionsServiceError::Sql(_) | SessionsServiceError::AlreadyExists)) => {
            error!("failed to resolve session: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use qrcodes_app::domain::sessions::{
        MockSessionsService,
        records::{Session, ShopDomain},
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::state_with_sessions;

    use super::*;

    #[salvo::handler]
    async fn echo_shop(depot: &mut Depot, res: &mut Response) {
        let shop = depot
            .session_or_401()
            .map_or_else(|_| "missing".to_string(), |session| session.shop.to_string());

        res.render(shop);
    }

    fn make_service(sessions: MockSessionsService) -> Service {
        let router = Router::new()
            .hoop(inject(state_with_sessions(sessions)))
            .hoop(handler)
            .push(Router::new().get(echo_shop));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_token_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(SessionsServiceError::NotFound));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_session_lookup_failure_returns_500() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(SessionsServiceError::AlreadyExists));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_session() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| {
                Ok(Session {
                    shop: ShopDomain::new("example.myshopify.com"),
                    access_token: "shpat_token".to_string(),
                })
            });

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer abc123", true)
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "example.myshopify.com");

        Ok(())
    }
}
