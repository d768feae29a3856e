//! Quote intake service.
//!
//! Organized by domain:
//! - `mod.rs`: Core types, wire payloads, `QuoteService`
//! - `handlers.rs`: Thin axum handlers
//! - `submission.rs`: Quote submission pipeline
//! - `validation.rs`: Single-field live validation

mod handlers;
mod submission;
mod validation;

use std::sync::Arc;

use quote_core::submission::loose_string;
use quote_core::validation::{Field, PhoneKind};
use quote_core::ValidationRules;
use quote_db::QuoteStore;
use serde::{Deserialize, Serialize};

pub use handlers::{submit_quote, validate_field};
pub use submission::SUBMITTED_MESSAGE;
pub use validation::{
    EMPTY_VALUE_MESSAGE, FIELD_AND_VALUE_REQUIRED_MESSAGE, UNKNOWN_FIELD_MESSAGE,
    VALIDATION_PASSED_MESSAGE,
};

// ============================================================================
// Wire payloads
// ============================================================================

/// `POST /validate` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldValidationRequest {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field: Some(field.as_str().to_string()),
            value: Some(value.into()),
        }
    }
}

/// `POST /validate` success payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub field: Field,
    pub normalized: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_kind: Option<PhoneKind>,
}

// ============================================================================
// QuoteService
// ============================================================================

/// Quote intake: submission and live field validation.
#[derive(Debug, Clone)]
pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    rules: Arc<ValidationRules>,
}

impl QuoteService {
    #[must_use]
    pub fn new(store: Arc<dyn QuoteStore>, rules: Arc<ValidationRules>) -> Self {
        Self { store, rules }
    }

    /// Store health, for readiness probes.
    pub async fn store_ready(&self) -> bool {
        self.store.health_check().await
    }
}
