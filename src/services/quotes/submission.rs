//! Quote submission pipeline: validate, uniqueness pre-checks, persist.

use chrono::{Datelike, Utc};
use quote_core::{AppError, QuoteSubmission, validate_submission};
use quote_db::{CreateQuoteParams, Quote};
use tracing::{debug, info, instrument};

use super::QuoteService;

pub const SUBMITTED_MESSAGE: &str = "Quote request submitted successfully.";

impl QuoteService {
    /// Validate and store a quote request.
    ///
    /// Gates run in order: presence, format, email uniqueness, phone
    /// uniqueness, insert. The store's unique constraints back the
    /// pre-checks when two submissions race.
    #[instrument(skip_all, fields(quote_id))]
    pub async fn submit(&self, submission: &QuoteSubmission) -> Result<Quote, AppError> {
        let result = self.submit_for_year(submission, Utc::now().year()).await;
        metrics::counter!("quote_submissions_total", "outcome" => outcome_label(&result))
            .increment(1);
        result
    }

    pub(super) async fn submit_for_year(
        &self,
        submission: &QuoteSubmission,
        current_year: i32,
    ) -> Result<Quote, AppError> {
        let quote = validate_submission(&self.rules, submission, current_year)?;

        if self.store.find_by_email(&quote.email).await?.is_some() {
            debug!("Rejected submission: email already stored");
            return Err(AppError::already_exists("Email"));
        }
        if self.store.find_by_phone(&quote.phone.digits).await?.is_some() {
            debug!("Rejected submission: phone already stored");
            return Err(AppError::already_exists("Phone number"));
        }

        let created = self.store.create(CreateQuoteParams::from(&quote)).await?;

        tracing::Span::current().record("quote_id", tracing::field::display(created.id));
        info!(
            quote_id = %created.id,
            district = %created.district,
            phone_kind = %quote.phone.kind,
            "Quote request stored"
        );
        Ok(created)
    }
}

fn outcome_label(result: &Result<Quote, AppError>) -> &'static str {
    match result {
        Ok(_) => "created",
        Err(AppError::InvalidArgument(_)) => "invalid",
        Err(AppError::Conflict(_)) => "conflict",
        Err(AppError::Unavailable(_) | AppError::Internal(_)) => "error",
    }
}
