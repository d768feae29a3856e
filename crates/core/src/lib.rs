//! Core library with shared types and rules for the quote service.
//!
//! This crate provides components used by both the HTTP API and the client:
//! - Error types with automatic JSON response conversion
//! - The `{ success, message, data }` response envelope
//! - Field validation rules (names, email, phone)
//! - Quote submission checks, district list and premium estimate

pub mod districts;
pub mod envelope;
pub mod error;
pub mod premium;
pub mod str_ext;
pub mod submission;
pub mod validation;

pub use districts::{DISTRICTS, find_district};
pub use envelope::ApiResponse;
pub use error::{AppError, INTERNAL_ERROR_MESSAGE};
pub use premium::estimate_premium;
pub use str_ext::{OptionStrExt, StrExt};
pub use submission::{
    DEFAULT_COVERAGE, Gender, MISSING_FIELDS_MESSAGE, QuoteSubmission, ValidatedQuote,
    validate_submission,
};
pub use validation::{
    Accepted, Field, FieldError, PhoneKind, Rejection, ValidationRules, validate_field,
};
