//! QR Code Form
//!
//! Binds a loaded record to editable fields and reconciles action responses
//! into page state. Rendering is left to the caller: [`FormController::view`]
//! describes the page as plain data.

mod client;
mod controller;
mod fields;
mod model;
mod picker;
mod view;

use crate::domain::qr_codes::records::QrCodeId;

pub use client::{ActionClient, ActionClientError, HttpActionClient, MockActionClient};
pub use controller::{FormController, FormEffects, FormError, MockFormEffects, SubmitError};
pub use fields::{FieldEdit, FormFields, SelectedProduct};
pub use model::{Effect, FormEvent, FormModel, FormStatus, QrPanel, effects_for};
pub use picker::{MockResourcePicker, PickedImage, PickedProduct, PickedVariant, ResourcePicker};
pub use view::{ButtonView, DestinationOption, ErrorBanner, PageView, ProductPanel, TextFieldView};

/// Index page the form returns to.
pub const APP_HOME: &str = "/app";

pub const SAVED_TOAST: &str = "QR code saved";
pub const DELETED_TOAST: &str = "QR code deleted";

/// Client-side path of the edit page for a record.
pub fn edit_path(id: QrCodeId) -> String {
    format!("{APP_HOME}/qrcodes/{id}")
}
