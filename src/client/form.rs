//! Quote form state and submission flow.

use quote_core::submission::{parse_birth_year, parse_coverage};
use quote_core::{DEFAULT_COVERAGE, Gender, PhoneKind, QuoteSubmission, StrExt, estimate_premium};
use thiserror::Error;
use tracing::{info, warn};

use super::api::{ClientError, QuoteApi, SubmitOutcome};

pub const SUCCESS_TITLE: &str = "Quote Submitted";
pub const SUCCESS_MESSAGE: &str =
    "Quote request submitted! You'll receive it via email within 24 hours.";
pub const MISSING_TITLE: &str = "Missing Information";
pub const MISSING_MESSAGE: &str = "Please fill in all required fields.";
pub const VALIDATION_TITLE: &str = "Validation Error";
pub const DUPLICATE_TITLE: &str = "Already Submitted";
pub const FAILURE_TITLE: &str = "Submission Failed";
pub const RETRY_MESSAGE: &str = "We couldn't submit your quote right now. Please try again.";

/// Inputs of the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    District,
    Phone,
    DateOfBirth,
    Gender,
    Email,
    CoverageAmount,
}

impl FormField {
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::District,
        Self::Phone,
        Self::DateOfBirth,
        Self::Gender,
        Self::Email,
        Self::CoverageAmount,
    ];

    /// Wire name in the submission body.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::District => "district",
            Self::Phone => "phone",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
            Self::Email => "email",
            Self::CoverageAmount => "coverageAmount",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::District => "District",
            Self::Phone => "Phone Number",
            Self::DateOfBirth => "Year of Birth",
            Self::Gender => "Gender",
            Self::Email => "Email Address",
            Self::CoverageAmount => "Coverage Amount",
        }
    }

    /// Coverage falls back to the default amount when left blank.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::CoverageAmount)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("A submission is already in flight")]
    AlreadySubmitting,
    #[error("Missing required fields: {0:?}")]
    MissingFields(Vec<FormField>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Modal shown after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// Dialog for a submit refused before any request was made.
    #[must_use]
    pub fn blocked(reason: &SubmitBlocked) -> Self {
        match reason {
            SubmitBlocked::AlreadySubmitting => {
                Self::new(DialogKind::Info, "Please Wait", "Your quote is being submitted.")
            }
            SubmitBlocked::MissingFields(_) => {
                Self::new(DialogKind::Warning, MISSING_TITLE, MISSING_MESSAGE)
            }
        }
    }
}

/// Form values plus submission state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteForm {
    first_name: String,
    last_name: String,
    district: String,
    phone: String,
    date_of_birth: String,
    gender: String,
    email: String,
    coverage_amount: String,
    phone_kind: PhoneKind,
    state: SubmissionState,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            district: String::new(),
            phone: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            email: String::new(),
            coverage_amount: DEFAULT_COVERAGE.to_string(),
            phone_kind: PhoneKind::default(),
            state: SubmissionState::Idle,
        }
    }
}

impl QuoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::District => &self.district,
            FormField::Phone => &self.phone,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::Gender => &self.gender,
            FormField::Email => &self.email,
            FormField::CoverageAmount => &self.coverage_amount,
        }
    }

    /// Set a field. Phone input is masked to digits, capped by the phone kind.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::District => &mut self.district,
            FormField::Phone => {
                self.phone = mask_phone(&value, self.phone_kind);
                return;
            }
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::Gender => &mut self.gender,
            FormField::Email => &mut self.email,
            FormField::CoverageAmount => &mut self.coverage_amount,
        };
        *slot = value;
    }

    #[must_use]
    pub const fn phone_kind(&self) -> PhoneKind {
        self.phone_kind
    }

    /// Switch mobile/landline; the current number is re-masked.
    pub fn set_phone_kind(&mut self, kind: PhoneKind) {
        self.phone_kind = kind;
        self.phone = mask_phone(&self.phone, kind);
    }

    /// Clear every value. Submission state is left alone.
    pub fn reset(&mut self) {
        *self = Self {
            state: self.state,
            ..Self::default()
        };
    }

    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.state == SubmissionState::Idle
    }

    /// Required fields that are blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.value(*f).non_blank().is_none())
            .collect()
    }

    #[must_use]
    pub fn to_submission(&self) -> QuoteSubmission {
        let some = |s: &str| s.non_blank().map(str::to_string);
        QuoteSubmission {
            first_name: some(&self.first_name),
            last_name: some(&self.last_name),
            district: some(&self.district),
            phone: some(&self.phone),
            date_of_birth: some(&self.date_of_birth),
            gender: some(&self.gender),
            email: some(&self.email),
            coverage_amount: some(&self.coverage_amount),
        }
    }

    /// Monthly premium estimate, once birth year and gender are usable.
    #[must_use]
    pub fn premium_estimate(&self, current_year: i32) -> Option<i64> {
        let birth_year = parse_birth_year(&self.date_of_birth, current_year).ok()?;
        let gender = self.gender.parse::<Gender>().ok()?;
        let coverage = parse_coverage(Some(&self.coverage_amount)).ok()?;
        Some(estimate_premium(birth_year, gender, coverage, current_year))
    }

    /// Enter `Submitting` and hand out the payload, or refuse.
    pub fn begin_submit(&mut self) -> Result<QuoteSubmission, SubmitBlocked> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(SubmitBlocked::MissingFields(missing));
        }
        self.state = SubmissionState::Submitting;
        Ok(self.to_submission())
    }

    /// Return to `Idle` and turn the outcome into a dialog.
    /// The form is cleared after a successful submission.
    pub fn finish_submit(&mut self, result: Result<SubmitOutcome, ClientError>) -> Dialog {
        self.state = SubmissionState::Idle;
        match result {
            Ok(SubmitOutcome::Created(quote)) => {
                info!(quote_id = %quote.id, "Quote submitted");
                self.reset();
                Dialog::new(DialogKind::Success, SUCCESS_TITLE, SUCCESS_MESSAGE)
            }
            Ok(SubmitOutcome::Invalid(message)) => {
                Dialog::new(DialogKind::Warning, VALIDATION_TITLE, message)
            }
            Ok(SubmitOutcome::Conflict(message)) => {
                Dialog::new(DialogKind::Warning, DUPLICATE_TITLE, message)
            }
            Ok(SubmitOutcome::Failed(message)) => {
                warn!(%message, "Quote submission failed on the server");
                Dialog::new(DialogKind::Error, FAILURE_TITLE, RETRY_MESSAGE)
            }
            Err(e) => {
                warn!(error = %e, "Quote submission request failed");
                Dialog::new(DialogKind::Error, FAILURE_TITLE, RETRY_MESSAGE)
            }
        }
    }

    /// Full submit round trip against `api`.
    pub async fn submit<A: QuoteApi + ?Sized>(&mut self, api: &A) -> Dialog {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(blocked) => return Dialog::blocked(&blocked),
        };
        let result = api.submit_quote(&submission).await;
        self.finish_submit(result)
    }
}

fn mask_phone(raw: &str, kind: PhoneKind) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(kind.max_input_len())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use quote_db::Quote;
    use uuid::Uuid;

    use super::*;

    fn filled() -> QuoteForm {
        let mut form = QuoteForm::new();
        form.set_field(FormField::FirstName, "Sita");
        form.set_field(FormField::LastName, "Sharma");
        form.set_field(FormField::District, "Kathmandu");
        form.set_field(FormField::Phone, "9812345678");
        form.set_field(FormField::DateOfBirth, "1990");
        form.set_field(FormField::Gender, "female");
        form.set_field(FormField::Email, "sita@example.com");
        form
    }

    fn created() -> SubmitOutcome {
        SubmitOutcome::Created(Quote {
            id: Uuid::new_v4(),
            first_name: "Sita".into(),
            last_name: "Sharma".into(),
            district: "Kathmandu".into(),
            phone: "9812345678".into(),
            date_of_birth: 1990,
            gender: "female".into(),
            email: "sita@example.com".into(),
            coverage_amount: 500_000,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn new_form_defaults_coverage() {
        let form = QuoteForm::new();
        assert_eq!(form.value(FormField::CoverageAmount), "500000");
        assert_eq!(form.phone_kind(), PhoneKind::Mobile);
        assert!(form.is_submit_enabled());
    }

    #[test]
    fn phone_mask_keeps_digits_up_to_kind_length() {
        let mut form = QuoteForm::new();
        form.set_field(FormField::Phone, "+977 98-1234-5678");
        assert_eq!(form.value(FormField::Phone), "9779812345");

        form.set_field(FormField::Phone, "01-4123456789");
        form.set_phone_kind(PhoneKind::Landline);
        assert_eq!(form.value(FormField::Phone), "014123456");
    }

    #[test]
    fn missing_fields_lists_blank_required_inputs() {
        let mut form = filled();
        form.set_field(FormField::Email, "  ");
        form.set_field(FormField::CoverageAmount, "");
        assert_eq!(form.missing_fields(), vec![FormField::Email]);
    }

    #[test]
    fn blank_coverage_is_omitted_from_submission() {
        let mut form = filled();
        form.set_field(FormField::CoverageAmount, "");
        let submission = form.to_submission();
        assert_eq!(submission.coverage_amount, None);
        assert_eq!(submission.first_name.as_deref(), Some("Sita"));
    }

    #[test]
    fn premium_needs_year_and_gender() {
        let mut form = QuoteForm::new();
        assert_eq!(form.premium_estimate(2025), None);
        form.set_field(FormField::DateOfBirth, "1990");
        assert_eq!(form.premium_estimate(2025), None);
        form.set_field(FormField::Gender, "female");
        // age 35 -> 30, 5 * 30 * 0.9
        assert_eq!(form.premium_estimate(2025), Some(135));
        form.set_field(FormField::DateOfBirth, "1800");
        assert_eq!(form.premium_estimate(2025), None);
    }

    #[test]
    fn missing_fields_block_submit() {
        let mut form = QuoteForm::new();
        let blocked = form.begin_submit().unwrap_err();
        assert!(matches!(blocked, SubmitBlocked::MissingFields(ref f) if f.len() == 7));
        assert_eq!(Dialog::blocked(&blocked).title, MISSING_TITLE);
        assert_eq!(form.state(), SubmissionState::Idle);
    }

    #[test]
    fn second_submit_is_refused_while_in_flight() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(!form.is_submit_enabled());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::AlreadySubmitting));
    }

    #[test]
    fn success_resets_form_and_reenables_submit() {
        let mut form = filled();
        form.begin_submit().unwrap();
        let dialog = form.finish_submit(Ok(created()));

        assert_eq!(dialog.kind, DialogKind::Success);
        assert!(form.is_submit_enabled());
        assert_eq!(form.value(FormField::FirstName), "");
    }

    #[test]
    fn outcomes_map_to_distinct_dialogs() {
        let mut form = filled();

        form.begin_submit().unwrap();
        let invalid = form.finish_submit(Ok(SubmitOutcome::Invalid("Invalid email.".into())));
        form.begin_submit().unwrap();
        let conflict =
            form.finish_submit(Ok(SubmitOutcome::Conflict("Email already exists.".into())));
        form.begin_submit().unwrap();
        let failed = form.finish_submit(Err(ClientError::UnexpectedStatus(502)));

        assert_eq!(invalid.title, VALIDATION_TITLE);
        assert_eq!(invalid.message, "Invalid email.");
        assert_eq!(conflict.title, DUPLICATE_TITLE);
        assert_eq!(conflict.message, "Email already exists.");
        assert_eq!(failed.kind, DialogKind::Error);
        assert_eq!(failed.message, RETRY_MESSAGE);
        // Values are kept for a retry.
        assert_eq!(form.value(FormField::Email), "sita@example.com");
        assert!(form.is_submit_enabled());
    }
}
