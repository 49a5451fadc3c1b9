//! QR image rendering.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use qrcode::{QrCode, render::svg};
use thiserror::Error;

use crate::domain::qr_codes::records::QrCodeId;

const MIN_DIMENSION: u32 = 200;

#[derive(Debug, Error)]
pub enum QrImageError {
    #[error("failed to encode QR code: {0}")]
    Encode(String),
}

/// Renders QR images that point at the app's public scan endpoint.
#[derive(Debug, Clone)]
pub struct QrImageRenderer {
    app_url: String,
}

impl QrImageRenderer {
    #[must_use]
    pub fn new(app_url: impl Into<String>) -> Self {
        Self {
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL encoded in the image for record `id`.
    pub fn scan_url(&self, id: QrCodeId) -> String {
        format!("{}/qrcodes/{id}/scan", self.app_url)
    }

    /// SVG image as a base64 `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the scan URL does not fit in a QR symbol.
    pub fn render(&self, id: QrCodeId) -> Result<String, QrImageError> {
        let code = QrCode::new(self.scan_url(id).as_bytes())
            .map_err(|e| QrImageError::Encode(e.to_string()))?;

        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
            .build();

        Ok(format!("data:image/svg+xml;base64,{}", BASE64.encode(image)))
    }
}
