//! QR Code Action Results

use serde::{Deserialize, Serialize};

use crate::domain::qr_codes::{
    records::{QrCodeId, QrCodeRecord},
    validation::FieldErrors,
};

/// Result of a save attempt. Validation failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(QrCodeRecord),
    Invalid(FieldErrors),
}

/// Body returned by a `/qrcodes/{id}` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum ActionResponse {
    Deleted { deleted_id: QrCodeId },
    Saved { qr_code: QrCodeRecord },
    Invalid { errors: FieldErrors },
}

impl From<SaveOutcome> for ActionResponse {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Saved(qr_code) => Self::Saved { qr_code },
            SaveOutcome::Invalid(errors) => Self::Invalid { errors },
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::qr_codes::validation::{QrCodeField, TITLE_REQUIRED};

    use super::*;

    #[test]
    fn deleted_uses_camel_case_key() -> TestResult {
        let response = ActionResponse::Deleted {
            deleted_id: QrCodeId::new(9),
        };

        assert_eq!(
            serde_json::to_value(&response)?,
            serde_json::json!({ "deletedId": 9 })
        );

        Ok(())
    }

    #[test]
    fn invalid_outcome_becomes_errors_body() -> TestResult {
        let mut errors = FieldErrors::new();

        errors.insert(QrCodeField::Title, TITLE_REQUIRED);

        let response = ActionResponse::from(SaveOutcome::Invalid(errors));

        assert_eq!(
            serde_json::to_value(&response)?,
            serde_json::json!({ "errors": { "title": "Title is required" } })
        );

        Ok(())
    }

    #[test]
    fn errors_body_deserializes_as_invalid() -> TestResult {
        let response: ActionResponse =
            serde_json::from_str(r#"{"errors":{"productId":"Product is required"}}"#)?;

        assert!(matches!(response, ActionResponse::Invalid { .. }));

        Ok(())
    }
}
