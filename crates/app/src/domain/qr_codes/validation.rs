//! QR Code Validation
//!
//! The same rules run in the form controller before a request is sent and in
//! the record service before anything is persisted.

use std::{
    collections::{BTreeMap, btree_map},
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};

use crate::domain::qr_codes::{
    data::{QrCodeInput, ValidQrCode},
    records::Destination,
};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const PRODUCT_REQUIRED: &str = "Product is required";
pub const DESTINATION_INVALID: &str = "Destination is invalid";

/// Editable QR code field, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QrCodeField {
    Title,
    ProductId,
    ProductVariantId,
    ProductHandle,
    Destination,
}

impl QrCodeField {
    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ProductId => "productId",
            Self::ProductVariantId => "productVariantId",
            Self::ProductHandle => "productHandle",
            Self::Destination => "destination",
        }
    }
}

/// Field name to error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<QrCodeField, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: QrCodeField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: QrCodeField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: QrCodeField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, QrCodeField, String> {
        self.0.iter()
    }

    /// Messages in field order, for a summary banner.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, message) in self.messages().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            f.write_str(message)?;
        }

        Ok(())
    }
}

impl Error for FieldErrors {}

impl FromIterator<(QrCodeField, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (QrCodeField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a QrCodeField, &'a String);
    type IntoIter = btree_map::Iter<'a, QrCodeField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Validate a submitted form.
///
/// A missing destination defaults to [`Destination::Product`]; missing
/// variant and handle become empty strings.
///
/// # Errors
///
/// Returns every failing field at once.
pub fn validate(input: &QrCodeInput) -> Result<ValidQrCode, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = input.title.as_deref().unwrap_or_default();

    if title.trim().is_empty() {
        errors.insert(QrCodeField::Title, TITLE_REQUIRED);
    }

    let product_id = input.product_id.as_deref().unwrap_or_default();

    if product_id.is_empty() {
        errors.insert(QrCodeField::ProductId, PRODUCT_REQUIRED);
    }

    let destination = match input.destination.as_deref() {
        None | Some("") => Some(Destination::default()),
        Some(value) => value.parse().ok(),
    };

    if destination.is_none() {
        errors.insert(QrCodeField::Destination, DESTINATION_INVALID);
    }

    match destination {
        Some(destination) if errors.is_empty() => Ok(ValidQrCode {
            title: title.to_string(),
            product_id: product_id.to_string(),
            product_variant_id: input.product_variant_id.clone().unwrap_or_default(),
            product_handle: input.product_handle.clone().unwrap_or_default(),
            destination,
        }),
        Some(_) | None => Err(errors),
    }
}
