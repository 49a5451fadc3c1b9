//! Page description for a renderer.

use crate::{
    domain::qr_codes::{
        records::Destination,
        target::QrCodeTarget,
        validation::{FieldErrors, QrCodeField},
    },
    form::{
        APP_HOME,
        fields::SelectedProduct,
        model::{FormModel, FormStatus, QrPanel},
    },
};

pub const CREATE_HEADING: &str = "Create QR code";
pub const EDIT_HEADING: &str = "Edit QR code";
pub const SAVE_LABEL: &str = "Save";
pub const DELETE_LABEL: &str = "Delete QR code";
pub const ERROR_BANNER_TITLE: &str = "There were errors with your submission";
pub const CHANGE_PRODUCT_LABEL: &str = "Change product";
pub const SELECT_PRODUCT_LABEL: &str = "Select product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub title: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldView {
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductPanel {
    Selected {
        product: SelectedProduct,
        action_label: &'static str,
    },
    Empty {
        action_label: &'static str,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationOption {
    pub value: Destination,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub heading: &'static str,
    pub back_action: &'static str,
    pub save: ButtonView,
    /// Only offered for stored records.
    pub delete: Option<ButtonView>,
    pub error_banner: Option<ErrorBanner>,
    pub title: TextFieldView,
    pub product: ProductPanel,
    pub destinations: Vec<DestinationOption>,
    pub qr: Option<QrPanel>,
}

impl PageView {
    pub(crate) fn of(model: &FormModel) -> Self {
        let is_new = model.target == QrCodeTarget::Draft;
        let deleting = model.status == FormStatus::Deleting;

        Self {
            heading: if is_new { CREATE_HEADING } else { EDIT_HEADING },
            back_action: APP_HOME,
            save: ButtonView {
                label: SAVE_LABEL,
                loading: deleting,
            },
            delete: (!is_new).then_some(ButtonView {
                label: DELETE_LABEL,
                loading: deleting,
            }),
            error_banner: error_banner(&model.errors),
            title: TextFieldView {
                label: "Title",
                value: model.fields.title.clone(),
                error: model.errors.get(QrCodeField::Title).map(str::to_string),
            },
            product: match &model.product {
                Some(product) => ProductPanel::Selected {
                    product: product.clone(),
                    action_label: CHANGE_PRODUCT_LABEL,
                },
                None => ProductPanel::Empty {
                    action_label: SELECT_PRODUCT_LABEL,
                    error: model.errors.get(QrCodeField::ProductId).map(str::to_string),
                },
            },
            destinations: [
                (Destination::Product, "Product page"),
                (Destination::Cart, "Checkout page with product in the cart"),
            ]
            .into_iter()
            .map(|(value, label)| DestinationOption {
                value,
                label,
                checked: model.fields.destination == value,
            })
            .collect(),
            qr: model.qr.clone(),
        }
    }
}

fn error_banner(errors: &FieldErrors) -> Option<ErrorBanner> {
    if errors.is_empty() {
        return None;
    }

    Some(ErrorBanner {
        title: ERROR_BANNER_TITLE,
        messages: errors.messages().map(str::to_string).collect(),
    })
}
