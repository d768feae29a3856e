//! Single-field live validation backing `POST /validate`.

use quote_core::validation::FieldError;
use quote_core::{AppError, StrExt, validate_field};
use tracing::debug;

use super::{FieldValidation, FieldValidationRequest, QuoteService};

pub const VALIDATION_PASSED_MESSAGE: &str = "Field validation passed.";
pub const FIELD_AND_VALUE_REQUIRED_MESSAGE: &str = "Field and value are required.";
pub const EMPTY_VALUE_MESSAGE: &str = "Value cannot be empty.";
pub const UNKNOWN_FIELD_MESSAGE: &str = "Unknown field for validation.";

impl QuoteService {
    /// Validate one field without touching the store.
    pub fn validate_field(
        &self,
        request: &FieldValidationRequest,
    ) -> Result<FieldValidation, AppError> {
        let (Some(field), Some(value)) = (request.field.as_deref(), request.value.as_deref())
        else {
            return Err(AppError::invalid(FIELD_AND_VALUE_REQUIRED_MESSAGE));
        };
        if field.is_empty() {
            return Err(AppError::invalid(FIELD_AND_VALUE_REQUIRED_MESSAGE));
        }
        let Some(value) = value.non_blank() else {
            return Err(AppError::invalid(EMPTY_VALUE_MESSAGE));
        };

        match validate_field(&self.rules, field, value) {
            Ok(accepted) => {
                let field = field
                    .parse()
                    .map_err(|_| AppError::invalid(UNKNOWN_FIELD_MESSAGE))?;
                Ok(FieldValidation {
                    field,
                    normalized: accepted.normalized,
                    phone_kind: accepted.phone_kind,
                })
            }
            Err(FieldError::Rejected(rejection)) => {
                debug!(field, reason = rejection.reason(), "Field rejected");
                Err(rejection.into())
            }
            Err(FieldError::Unsupported(_)) => Err(AppError::invalid(UNKNOWN_FIELD_MESSAGE)),
        }
    }
}
