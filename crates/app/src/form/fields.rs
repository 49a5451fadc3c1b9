use crate::domain::qr_codes::{
    data::QrCodeInput,
    models::{LoadedQrCode, QrCodeDetails},
    records::{Destination, QrCodeRecord},
    validation::QrCodeField,
};

/// Current values of the editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub product_id: String,
    pub product_variant_id: String,
    pub product_handle: String,
    pub destination: Destination,
}

impl FormFields {
    /// The body submitted to the action route.
    pub fn to_input(&self) -> QrCodeInput {
        QrCodeInput {
            title: Some(self.title.clone()),
            product_id: Some(self.product_id.clone()),
            product_variant_id: Some(self.product_variant_id.clone()),
            product_handle: Some(self.product_handle.clone()),
            destination: Some(self.destination.as_str().to_string()),
        }
    }
}

impl From<&QrCodeRecord> for FormFields {
    fn from(record: &QrCodeRecord) -> Self {
        Self {
            title: record.title.clone(),
            product_id: record.product_id.clone(),
            product_variant_id: record.product_variant_id.clone(),
            product_handle: record.product_handle.clone(),
            destination: record.destination,
        }
    }
}

impl From<&LoadedQrCode> for FormFields {
    fn from(loaded: &LoadedQrCode) -> Self {
        match loaded {
            LoadedQrCode::Existing(details) => Self::from(&details.record),
            LoadedQrCode::Draft(draft) => Self {
                title: draft.title.clone(),
                destination: draft.destination,
                ..Self::default()
            },
        }
    }
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Destination(Destination),
}

impl FieldEdit {
    pub const fn field(&self) -> QrCodeField {
        match self {
            Self::Title(_) => QrCodeField::Title,
            Self::Destination(_) => QrCodeField::Destination,
        }
    }

    pub(crate) fn apply(self, fields: &mut FormFields) {
        match self {
            Self::Title(title) => fields.title = title,
            Self::Destination(destination) => fields.destination = destination,
        }
    }
}

/// Product shown in the product panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedProduct {
    pub title: Option<String>,
    pub handle: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
}

impl SelectedProduct {
    /// `None` when the record has no product yet.
    pub fn from_details(details: &QrCodeDetails) -> Option<Self> {
        if details.record.product_id.is_empty() {
            return None;
        }

        Some(Self {
            title: details.product_title.clone(),
            handle: details.record.product_handle.clone(),
            image_url: details.product_image.clone(),
            image_alt: details.product_alt.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::qr_codes::models::DraftQrCode;

    use super::*;

    #[test]
    fn draft_fields_default_to_product_destination() {
        let fields = FormFields::from(&LoadedQrCode::Draft(DraftQrCode::default()));

        assert_eq!(fields, FormFields::default());
        assert_eq!(fields.destination, Destination::Product);
    }

    #[test]
    fn input_carries_every_field() {
        let fields = FormFields {
            title: "Sale".to_string(),
            product_id: "gid://shopify/Product/1".to_string(),
            product_variant_id: "gid://shopify/ProductVariant/2".to_string(),
            product_handle: "sale".to_string(),
            destination: Destination::Cart,
        };

        let input = fields.to_input();

        assert_eq!(input.title.as_deref(), Some("Sale"));
        assert_eq!(input.product_handle.as_deref(), Some("sale"));
        assert_eq!(input.destination.as_deref(), Some("cart"));
    }
}
