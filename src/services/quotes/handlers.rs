//! Axum handlers for the quote endpoints.
//!
//! Thin handlers that decode the body and delegate to domain methods.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quote_core::{ApiResponse, AppError, QuoteSubmission};
use tracing::{debug, instrument};

use super::{FieldValidationRequest, SUBMITTED_MESSAGE, VALIDATION_PASSED_MESSAGE};
use crate::startup::AppState;

/// Message for bodies that are not valid JSON for the endpoint.
const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

/// `POST /quotes`
#[instrument(skip_all)]
pub async fn submit_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteSubmission>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(submission)) => state.quotes.submit(&submission).await,
        Err(rejection) => Err(invalid_body(&rejection)),
    };

    match result {
        Ok(quote) => (
            StatusCode::CREATED,
            Json(ApiResponse::with_data(SUBMITTED_MESSAGE, quote)),
        )
            .into_response(),
        Err(e) => state.error_response(e),
    }
}

/// `POST /validate`
#[instrument(skip_all)]
pub async fn validate_field(
    State(state): State<AppState>,
    payload: Result<Json<FieldValidationRequest>, JsonRejection>,
) -> Response {
    let result = payload
        .map_err(|rejection| invalid_body(&rejection))
        .and_then(|Json(request)| state.quotes.validate_field(&request));

    match result {
        Ok(validation) => Json(ApiResponse::with_data(
            VALIDATION_PASSED_MESSAGE,
            validation,
        ))
        .into_response(),
        Err(e) => state.error_response(e),
    }
}

fn invalid_body(rejection: &JsonRejection) -> AppError {
    debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::invalid(INVALID_BODY_MESSAGE)
}
