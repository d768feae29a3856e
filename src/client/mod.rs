//! Quote form client.
//!
//! - `api.rs`: `reqwest` client for `/quotes` and `/validate`
//! - `live_validation.rs`: Debounced per-field validation
//! - `form.rs`: Form state, submission state machine, dialogs
//! - `view.rs`: Typed input configuration

pub mod api;
pub mod form;
pub mod live_validation;
pub mod view;

pub use api::{
    ClientError, FieldValidationApi, QuoteApi, QuoteApiClient, SubmitOutcome, ValidationVerdict,
};
pub use form::{Dialog, DialogKind, FormField, QuoteForm, SubmissionState, SubmitBlocked};
pub use live_validation::{DEFAULT_DEBOUNCE, LiveValidator, WATCHED_FIELDS};
pub use view::{PhoneFieldConfig, RadioGroupConfig, SelectFieldConfig, TextFieldConfig};
