//! Form controller.

use mockall::automock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    domain::qr_codes::{
        action::ActionResponse,
        models::LoadedQrCode,
        records::{QrCodeId, QrCodeRecord},
        target::QrCodeTarget,
        validation::{FieldErrors, validate},
    },
    form::{
        client::{ActionClient, ActionClientError},
        fields::FieldEdit,
        model::{Effect, FormEvent, FormModel, effects_for},
        picker::ResourcePicker,
        view::PageView,
    },
};

/// Host UI side effects.
#[automock]
pub trait FormEffects: Send + Sync {
    fn toast(&self, message: &str);

    fn navigate(&self, path: &str);
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission has field errors: {0}")]
    Invalid(FieldErrors),

    #[error("submission failed")]
    Client(#[from] ActionClientError),

    #[error("unexpected action response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("QR code has not been saved yet")]
    NotPersisted,

    #[error("delete failed")]
    Client(#[from] ActionClientError),

    #[error("unexpected action response: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug)]
pub struct FormController<C, E> {
    model: FormModel,
    client: C,
    effects: E,
}

impl<C: ActionClient, E: FormEffects> FormController<C, E> {
    pub fn new(target: QrCodeTarget, loaded: &LoadedQrCode, client: C, effects: E) -> Self {
        Self {
            model: FormModel::loaded(target, loaded),
            client,
            effects,
        }
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn view(&self) -> PageView {
        PageView::of(&self.model)
    }

    pub fn edit(&mut self, edit: FieldEdit) {
        self.apply(FormEvent::Edited(edit));
    }

    /// Opens the picker and applies the first chosen product.
    ///
    /// Returns `false` when nothing was picked.
    pub async fn select_product<P: ResourcePicker + ?Sized>(&mut self, picker: &P) -> bool {
        let picked = picker
            .pick_product()
            .await
            .and_then(|products| products.into_iter().next());

        let Some(product) = picked else {
            return false;
        };

        self.apply(FormEvent::ProductPicked(product));

        true
    }

    /// Validates locally, then posts the fields.
    ///
    /// # Errors
    ///
    /// Returns field errors (local or from the server) or the transport failure.
    pub async fn submit(&mut self) -> Result<QrCodeRecord, SubmitError> {
        let input = self.model.fields.to_input();

        if let Err(errors) = validate(&input) {
            self.apply(FormEvent::ValidationFailed(errors.clone()));

            return Err(SubmitError::Invalid(errors));
        }

        let target = self.model.target;

        self.apply(FormEvent::SubmitStarted);

        let response = match self.client.submit(target, &input).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%target, %error, "QR code submit failed");

                self.apply(FormEvent::RequestFailed);

                return Err(error.into());
            }
        };

        let outcome = match &response {
            ActionResponse::Saved { qr_code } => Ok(qr_code.clone()),
            ActionResponse::Invalid { errors } => Err(SubmitError::Invalid(errors.clone())),
            ActionResponse::Deleted { deleted_id } => {
                self.apply(FormEvent::RequestFailed);

                return Err(SubmitError::UnexpectedResponse(format!(
                    "submit answered with deleted id {deleted_id}"
                )));
            }
        };

        self.finish(target, response);

        outcome
    }

    /// Deletes the stored record.
    ///
    /// # Errors
    ///
    /// Drafts have nothing to delete; transport failures are returned as-is.
    pub async fn delete(&mut self) -> Result<QrCodeId, FormError> {
        let target = self.model.target;

        let Some(id) = target.id() else {
            return Err(FormError::NotPersisted);
        };

        self.apply(FormEvent::DeleteStarted);

        let response = match self.client.delete(id).await {
            Ok(response) => response,
            Err(error) => {
                warn!(%id, %error, "QR code delete failed");

                self.apply(FormEvent::RequestFailed);

                return Err(error.into());
            }
        };

        let ActionResponse::Deleted { deleted_id } = response else {
            self.apply(FormEvent::RequestFailed);

            return Err(FormError::UnexpectedResponse(format!(
                "delete of {id} did not answer with a deleted id"
            )));
        };

        self.finish(target, response);

        Ok(deleted_id)
    }

    fn finish(&mut self, target: QrCodeTarget, response: ActionResponse) {
        let effects = effects_for(target, &response);

        self.apply(FormEvent::Responded(response));

        for effect in effects {
            match effect {
                Effect::Toast(message) => self.effects.toast(message),
                Effect::Navigate(path) => self.effects.navigate(&path),
            }
        }
    }

    fn apply(&mut self, event: FormEvent) {
        let model = std::mem::take(&mut self.model);

        self.model = model.reduce(event);

        debug!(status = ?self.model.status, "form transitioned");
    }
}
