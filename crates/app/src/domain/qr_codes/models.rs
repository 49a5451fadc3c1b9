//! QR Code Read Models

use serde::{Deserialize, Serialize};

use crate::domain::qr_codes::records::{Destination, QrCodeRecord};

/// A stored record hydrated with catalog metadata and scan links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeDetails {
    #[serde(flatten)]
    pub record: QrCodeRecord,

    /// The catalog no longer knows the product.
    pub product_deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,

    /// QR image as a `data:` URL. Only rendered for single-record loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Starting values for a record that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQrCode {
    pub destination: Destination,
    pub title: String,
}

impl Default for DraftQrCode {
    fn default() -> Self {
        Self {
            destination: Destination::Product,
            title: String::new(),
        }
    }
}

/// Loader result for a `/qrcodes/{id}` route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadedQrCode {
    Existing(Box<QrCodeDetails>),
    Draft(DraftQrCode),
}

impl LoadedQrCode {
    pub fn details(&self) -> Option<&QrCodeDetails> {
        match self {
            Self::Existing(details) => Some(details),
            Self::Draft(_) => None,
        }
    }
}

impl From<QrCodeDetails> for LoadedQrCode {
    fn from(details: QrCodeDetails) -> Self {
        Self::Existing(Box::new(details))
    }
}
