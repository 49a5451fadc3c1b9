//! Scan destination links.

use thiserror::Error;

use crate::domain::qr_codes::records::{Destination, QrCodeRecord};

const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized product variant id \"{0}\"")]
pub struct UnrecognizedVariant(pub String);

/// Storefront URL a scan of this record lands on.
///
/// # Errors
///
/// Cart destinations need a numeric product variant gid.
pub fn destination_url(record: &QrCodeRecord) -> Result<String, UnrecognizedVariant> {
    match record.destination {
        Destination::Product => Ok(format!(
            "https://{}/products/{}",
            record.shop, record.product_handle
        )),
        Destination::Cart => {
            let variant = variant_number(&record.product_variant_id)
                .ok_or_else(|| UnrecognizedVariant(record.product_variant_id.clone()))?;

            Ok(format!("https://{}/cart/{variant}:1", record.shop))
        }
    }
}

fn variant_number(variant_id: &str) -> Option<&str> {
    let (_, tail) = variant_id.split_once(VARIANT_GID_PREFIX)?;
    let end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());

    tail.get(..end).filter(|digits| !digits.is_empty())
}
