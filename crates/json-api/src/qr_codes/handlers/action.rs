//! QR Code Action Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{FormBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use qrcodes_app::domain::qr_codes::{
    action::ActionResponse, data::QrCodeInput, target::QrCodeTarget,
};

use crate::{
    extensions::*,
    qr_codes::{errors::into_status_error, responses::ActionResponseBody},
    state::State,
};

const DELETE_ACTION: &str = "delete";

/// Form posted by the QR code editor.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActionForm {
    /// `delete` removes the record; anything else saves it
    pub action: Option<String>,
    pub title: Option<String>,
    pub product_id: Option<String>,
    pub product_variant_id: Option<String>,
    pub product_handle: Option<String>,

    /// `product` or `cart`
    pub destination: Option<String>,
}

impl ActionForm {
    fn is_delete(&self) -> bool {
        self.action.as_deref() == Some(DELETE_ACTION)
    }
}

impl From<ActionForm> for QrCodeInput {
    fn from(form: ActionForm) -> Self {
        QrCodeInput {
            title: form.title,
            product_id: form.product_id,
            product_variant_id: form.product_variant_id,
            product_handle: form.product_handle,
            destination: form.destination,
        }
    }
}

/// QR Code Action Handler
///
/// Saves the submitted fields, creating the record when the id is `new`, or
/// deletes the record when `action=delete`. Validation failures answer 200
/// with `errors`.
#[endpoint(
    tags("qr_codes"),
    summary = "Save or Delete QR Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Saved, deleted, or field errors"),
        (status_code = StatusCode::NOT_FOUND, description = "QR code not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "qr_codes.action",
    skip(id, form, depot),
    fields(
        shop = tracing::field::Empty,
        target = tracing::field::Empty,
        action = tracing::field::Empty,
        outcome = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    form: FormBody<ActionForm>,
    depot: &mut Depot,
) -> Result<Json<ActionResponseBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;
    let form = form.into_inner();

    let span = tracing::Span::current();

    span.record("shop", tracing::field::display(&session.shop));
    span.record("target", id.as_str());

    let target = id
        .into_inner()
        .parse::<QrCodeTarget>()
        .or_400("QR code id must be \"new\" or a positive number")?;

    let response = if form.is_delete() {
        span.record("action", DELETE_ACTION);

        let id = target
            .id()
            .ok_or_else(|| StatusError::bad_request().brief("Unsaved QR codes cannot be deleted"))?;

        let deleted_id = state
            .app
            .qr_codes
            .delete_qr_code(session, id)
            .await
            .map_err(into_status_error)?;

        ActionResponse::Deleted { deleted_id }
    } else {
        span.record("action", "save");

        state
            .app
            .qr_codes
            .save_qr_code(session, target, form.into())
            .await
            .map_err(into_status_error)?
            .into()
    };

    span.record(
        "outcome",
        match &response {
            ActionResponse::Deleted { .. } => "deleted",
            ActionResponse::Saved { .. } => "saved",
            ActionResponse::Invalid { .. } => "invalid",
        },
    );

    Ok(Json(response.into()))
}

#[cfg(test)]
mod tests {
    use qrcodes_app::domain::qr_codes::{
        MockQrCodesService, QrCodesServiceError,
        action::SaveOutcome,
        records::QrCodeId,
        validation::{FieldErrors, QrCodeField, TITLE_REQUIRED},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::{
        qr_codes::handlers::tests::make_record,
        test_helpers::{TEST_SHOP, qr_codes_service},
    };

    use super::*;

    fn make_service(qr_codes: MockQrCodesService) -> Service {
        qr_codes_service(qr_codes, Router::with_path("qrcodes/{id}").post(handler))
    }

    #[tokio::test]
    async fn test_valid_draft_is_created() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_save_qr_code()
            .once()
            .withf(|session, target, input| {
                session.shop.as_str() == TEST_SHOP
                    && *target == QrCodeTarget::Draft
                    && input.title.as_deref() == Some("Sale")
                    && input.product_id.as_deref() == Some("gid://shopify/Product/1")
                    && input.destination.is_none()
            })
            .return_once(|_, _, _| Ok(SaveOutcome::Saved(make_record(12))));

        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_delete_qr_code().never();
        qr_codes.expect_record_scan().never();

        let mut res = TestClient::post("http://example.com/qrcodes/new")
            .form(&[
                ("title", "Sale"),
                ("productId", "gid://shopify/Product/1"),
                ("productVariantId", "gid://shopify/ProductVariant/11"),
                ("productHandle", "sale-item"),
            ])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Value = res.take_json().await?;

        assert_eq!(body["qrCode"]["id"], 12);
        assert_eq!(body["qrCode"]["title"], "Sale");
        assert_eq!(body["qrCode"]["destination"], "product");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_fields_answer_200_with_errors() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_save_qr_code()
            .once()
            .return_once(|_, _, _| {
                let mut errors = FieldErrors::new();

                errors.insert(QrCodeField::Title, TITLE_REQUIRED);

                Ok(SaveOutcome::Invalid(errors))
            });

        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_delete_qr_code().never();
        qr_codes.expect_record_scan().never();

        let mut res = TestClient::post("http://example.com/qrcodes/new")
            .form(&[("title", ""), ("productId", "123"), ("destination", "cart")])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "errors": { "title": "Title is required" } })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_id() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_delete_qr_code()
            .once()
            .withf(|session, id| session.shop.as_str() == TEST_SHOP && *id == QrCodeId::new(7))
            .return_once(|_, id| Ok(id));

        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_save_qr_code().never();
        qr_codes.expect_record_scan().never();

        let mut res = TestClient::post("http://example.com/qrcodes/7")
            .form(&[("action", "delete")])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_json::<Value>().await?, json!({ "deletedId": 7 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_returns_404() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes
            .expect_delete_qr_code()
            .once()
            .return_once(|_, _| Err(QrCodesServiceError::NotFound));

        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_save_qr_code().never();
        qr_codes.expect_record_scan().never();

        let res = TestClient::post("http://example.com/qrcodes/7")
            .form(&[("action", "delete")])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_draft_returns_400() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes.expect_delete_qr_code().never();
        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_save_qr_code().never();
        qr_codes.expect_record_scan().never();

        let res = TestClient::post("http://example.com/qrcodes/new")
            .form(&[("action", "delete")])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_id_returns_400() -> TestResult {
        let mut qr_codes = MockQrCodesService::new();

        qr_codes.expect_save_qr_code().never();
        qr_codes.expect_delete_qr_code().never();
        qr_codes.expect_load_qr_code().never();
        qr_codes.expect_list_qr_codes().never();
        qr_codes.expect_record_scan().never();

        let res = TestClient::post("http://example.com/qrcodes/0")
            .form(&[("title", "Sale")])
            .send(&make_service(qr_codes))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
