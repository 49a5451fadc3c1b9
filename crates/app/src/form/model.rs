//! Form state and transitions.

use crate::{
    domain::qr_codes::{
        action::ActionResponse,
        links,
        models::LoadedQrCode,
        records::QrCodeId,
        target::QrCodeTarget,
        validation::{FieldErrors, QrCodeField},
    },
    form::{
        APP_HOME, DELETED_TOAST, SAVED_TOAST, edit_path,
        fields::{FieldEdit, FormFields, SelectedProduct},
        picker::PickedProduct,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    /// Fields match the last saved values.
    #[default]
    Clean,
    Dirty,
    Submitting,
    /// Field errors are showing.
    Error,
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edited(FieldEdit),
    ProductPicked(PickedProduct),
    SubmitStarted,
    ValidationFailed(FieldErrors),
    DeleteStarted,
    Responded(ActionResponse),
    RequestFailed,
}

/// QR image panel of a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPanel {
    pub image: String,
    pub destination_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    pub target: QrCodeTarget,
    pub fields: FormFields,
    pub baseline: FormFields,
    pub status: FormStatus,
    pub errors: FieldErrors,
    pub product: Option<SelectedProduct>,
    pub deleted_id: Option<QrCodeId>,
    pub qr: Option<QrPanel>,
}

impl FormModel {
    /// Model for a freshly loaded page.
    pub fn loaded(target: QrCodeTarget, loaded: &LoadedQrCode) -> Self {
        let fields = FormFields::from(loaded);
        let details = loaded.details();

        Self {
            target,
            baseline: fields.clone(),
            fields,
            product: details.and_then(SelectedProduct::from_details),
            qr: details.and_then(|details| {
                details.image.clone().map(|image| QrPanel {
                    image,
                    destination_url: details.destination_url.clone(),
                })
            }),
            ..Self::default()
        }
    }

    pub const fn is_busy(&self) -> bool {
        matches!(self.status, FormStatus::Submitting | FormStatus::Deleting)
    }

    #[must_use]
    pub fn reduce(mut self, event: FormEvent) -> Self {
        match event {
            FormEvent::Edited(edit) => {
                self.errors.remove(edit.field());
                edit.apply(&mut self.fields);
                self.status = FormStatus::Dirty;
            }
            FormEvent::ProductPicked(picked) => {
                let image = picked.images.into_iter().next();

                self.fields.product_id = picked.id;
                self.fields.product_variant_id = picked
                    .variants
                    .into_iter()
                    .next()
                    .map(|variant| variant.id)
                    .unwrap_or_default();
                self.fields.product_handle.clone_from(&picked.handle);
                self.product = Some(SelectedProduct {
                    title: Some(picked.title),
                    handle: picked.handle,
                    image_alt: image.as_ref().and_then(|image| image.alt_text.clone()),
                    image_url: image.map(|image| image.original_src),
                });
                self.errors.remove(QrCodeField::ProductId);
                self.status = FormStatus::Dirty;
            }
            FormEvent::SubmitStarted => self.status = FormStatus::Submitting,
            FormEvent::ValidationFailed(errors) => {
                self.errors = errors;
                self.status = FormStatus::Error;
            }
            FormEvent::DeleteStarted => self.status = FormStatus::Deleting,
            FormEvent::Responded(ActionResponse::Saved { qr_code }) => {
                self.target = QrCodeTarget::Existing(qr_code.id);
                if let Some(panel) = self.qr.as_mut() {
                    panel.destination_url = links::destination_url(&qr_code).ok();
                }
                self.fields = FormFields::from(&qr_code);
                self.baseline = self.fields.clone();
                self.errors = FieldErrors::new();
                self.status = FormStatus::Clean;
            }
            FormEvent::Responded(ActionResponse::Invalid { errors }) => {
                self.errors = errors;
                self.status = FormStatus::Error;
            }
            FormEvent::Responded(ActionResponse::Deleted { deleted_id }) => {
                self.deleted_id = Some(deleted_id);
                self.status = FormStatus::Deleting;
            }
            FormEvent::RequestFailed => {
                self.status = if self.fields == self.baseline {
                    FormStatus::Clean
                } else {
                    FormStatus::Dirty
                };
            }
        }

        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Toast(&'static str),
    Navigate(String),
}

/// Side effects of an action response, given the target it was sent to.
pub fn effects_for(previous_target: QrCodeTarget, response: &ActionResponse) -> Vec<Effect> {
    match response {
        ActionResponse::Saved { qr_code } => {
            let mut effects = vec![Effect::Toast(SAVED_TOAST)];

            if previous_target.is_draft() {
                effects.push(Effect::Navigate(edit_path(qr_code.id)));
            }

            effects
        }
        ActionResponse::Deleted { .. } => vec![
            Effect::Toast(DELETED_TOAST),
            Effect::Navigate(APP_HOME.to_string()),
        ],
        ActionResponse::Invalid { .. } => Vec::new(),
    }
}
