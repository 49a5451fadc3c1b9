//! QR Code Data

use serde::{Deserialize, Serialize};

use crate::domain::qr_codes::records::{Destination, QrCodeRecord};

/// Submitted QR code form, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variant_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl From<&QrCodeRecord> for QrCodeInput {
    fn from(record: &QrCodeRecord) -> Self {
        Self {
            title: Some(record.title.clone()),
            product_id: Some(record.product_id.clone()),
            product_variant_id: Some(record.product_variant_id.clone()),
            product_handle: Some(record.product_handle.clone()),
            destination: Some(record.destination.as_str().to_string()),
        }
    }
}

/// Validated QR code fields, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQrCode {
    pub title: String,
    pub product_id: String,
    pub product_variant_id: String,
    pub product_handle: String,
    pub destination: Destination,
}
