//! QR Code Responses

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use qrcodes_app::domain::qr_codes::{
    action::ActionResponse,
    models::{LoadedQrCode, QrCodeDetails},
    records::QrCodeRecord,
};

/// A stored QR code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodeResponse {
    pub id: i64,
    pub shop: String,
    pub title: String,
    pub product_id: String,
    pub product_variant_id: String,
    pub product_handle: String,

    /// `product` or `cart`
    pub destination: String,

    /// Number of times the code has been scanned
    pub scans: i64,

    pub created_at: String,
}

impl From<QrCodeRecord> for QrCodeResponse {
    fn from(record: QrCodeRecord) -> Self {
        Self {
            id: record.id.into_inner(),
            shop: record.shop.to_string(),
            title: record.title,
            product_id: record.product_id,
            product_variant_id: record.product_variant_id,
            product_handle: record.product_handle,
            destination: record.destination.to_string(),
            scans: record.scans,
            created_at: record.created_at.to_string(),
        }
    }
}

/// A QR code as the edit page and the list show it.
///
/// A draft carries only `title` and `destination`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodeDetailsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<String>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_variant_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_handle: Option<String>,

    pub destination: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scans: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// The product no longer exists in the shop's catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_alt: Option<String>,

    /// Where a scan lands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,

    /// QR image as a `data:` URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<QrCodeDetails> for QrCodeDetailsResponse {
    fn from(details: QrCodeDetails) -> Self {
        let record = QrCodeResponse::from(details.record);

        Self {
            id: Some(record.id),
            shop: Some(record.shop),
            title: record.title,
            product_id: Some(record.product_id),
            product_variant_id: Some(record.product_variant_id),
            product_handle: Some(record.product_handle),
            destination: record.destination,
            scans: Some(record.scans),
            created_at: Some(record.created_at),
            product_deleted: Some(details.product_deleted),
            product_title: details.product_title,
            product_image: details.product_image,
            product_alt: details.product_alt,
            destination_url: details.destination_url,
            image: details.image,
        }
    }
}

impl From<LoadedQrCode> for QrCodeDetailsResponse {
    fn from(loaded: LoadedQrCode) -> Self {
        match loaded {
            LoadedQrCode::Existing(details) => (*details).into(),
            LoadedQrCode::Draft(draft) => Self {
                id: None,
                shop: None,
                title: draft.title,
                product_id: None,
                product_variant_id: None,
                product_handle: None,
                destination: draft.destination.to_string(),
                scans: None,
                created_at: None,
                product_deleted: None,
                product_title: None,
                product_image: None,
                product_alt: None,
                destination_url: None,
                image: None,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QrCodesResponse {
    /// The shop's QR codes, newest first
    pub qr_codes: Vec<QrCodeDetailsResponse>,
}

/// Result of a form action. Exactly one field is present.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActionResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<QrCodeResponse>,

    /// Field name to message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl From<ActionResponse> for ActionResponseBody {
    fn from(response: ActionResponse) -> Self {
        match response {
            ActionResponse::Deleted { deleted_id } => Self {
                deleted_id: Some(deleted_id.into_inner()),
                ..Self::default()
            },
            ActionResponse::Saved { qr_code } => Self {
                qr_code: Some(qr_code.into()),
                ..Self::default()
            },
            ActionResponse::Invalid { errors } => Self {
                errors: Some(
                    errors
                        .iter()
                        .map(|(field, message)| (field.as_str().to_string(), message.clone()))
                        .collect(),
                ),
                ..Self::default()
            },
        }
    }
}
