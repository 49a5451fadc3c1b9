//! Action transport.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Request, StatusCode};
use thiserror::Error;

use crate::domain::qr_codes::{
    action::ActionResponse, data::QrCodeInput, records::QrCodeId, target::QrCodeTarget,
};

#[derive(Debug, Error)]
pub enum ActionClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from action route: {0}")]
    UnexpectedResponse(String),
}

/// Posts form actions to the `/qrcodes/{id}` route.
#[automock]
#[async_trait]
pub trait ActionClient: Send + Sync {
    async fn submit(
        &self,
        target: QrCodeTarget,
        input: &QrCodeInput,
    ) -> Result<ActionResponse, ActionClientError>;

    async fn delete(&self, id: QrCodeId) -> Result<ActionResponse, ActionClientError>;
}

/// [`ActionClient`] over HTTP with form-encoded bodies.
#[derive(Debug, Clone)]
pub struct HttpActionClient {
    base_url: String,
    bearer_token: String,
    http: Client,
}

impl HttpActionClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
            http: Client::new(),
        }
    }

    fn action_url(&self, target: QrCodeTarget) -> String {
        format!("{}/qrcodes/{target}", self.base_url)
    }

    fn action_request<B: serde::Serialize + ?Sized>(
        &self,
        target: QrCodeTarget,
        body: &B,
    ) -> Result<Request, ActionClientError> {
        Ok(self
            .http
            .post(self.action_url(target))
            .bearer_auth(&self.bearer_token)
            .form(body)
            .build()?)
    }

    async fn post<B: serde::Serialize + Sync + ?Sized>(
        &self,
        target: QrCodeTarget,
        body: &B,
    ) -> Result<ActionResponse, ActionClientError> {
        let request = self.action_request(target, body)?;
        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        parse_response(status, &text)
    }
}

fn parse_response(status: StatusCode, text: &str) -> Result<ActionResponse, ActionClientError> {
    if !status.is_success() {
        return Err(ActionClientError::UnexpectedResponse(format!(
            "action failed with status {status}: {text}"
        )));
    }

    serde_json::from_str(text).map_err(|e| ActionClientError::UnexpectedResponse(e.to_string()))
}

#[async_trait]
impl ActionClient for HttpActionClient {
    async fn submit(
        &self,
        target: QrCodeTarget,
        input: &QrCodeInput,
    ) -> Result<ActionResponse, ActionClientError> {
        self.post(target, input).await
    }

    async fn delete(&self, id: QrCodeId) -> Result<ActionResponse, ActionClientError> {
        self.post(QrCodeTarget::Existing(id), &[("action", "delete")])
            .await
    }
}
