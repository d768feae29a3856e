//! HTTP client for the quote API.

use async_trait::async_trait;
use quote_core::validation::Field;
use quote_core::{ApiResponse, INTERNAL_ERROR_MESSAGE, QuoteSubmission};
use quote_db::Quote;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::services::quotes::{FieldValidation, FieldValidationRequest};

/// Transport or protocol failure talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),
}

/// Server verdict on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid(FieldValidation),
    Invalid(String),
}

/// Server outcome of a quote submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 201
    Created(Quote),
    /// 400
    Invalid(String),
    /// 409
    Conflict(String),
    /// 5xx or any other status.
    Failed(String),
}

/// Live validation calls.
#[async_trait]
pub trait FieldValidationApi: Send + Sync + 'static {
    async fn validate_field(
        &self,
        field: Field,
        value: &str,
    ) -> Result<ValidationVerdict, ClientError>;
}

/// Quote submission calls.
#[async_trait]
pub trait QuoteApi: Send + Sync {
    async fn submit_quote(&self, submission: &QuoteSubmission)
    -> Result<SubmitOutcome, ClientError>;
}

/// `reqwest` implementation of the API traits.
#[derive(Debug, Clone)]
pub struct QuoteApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuoteApiClient {
    /// Client rooted at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl FieldValidationApi for QuoteApiClient {
    async fn validate_field(
        &self,
        field: Field,
        value: &str,
    ) -> Result<ValidationVerdict, ClientError> {
        let response = self
            .http
            .post(self.url("/validate"))
            .json(&FieldValidationRequest::new(field, value))
            .send()
            .await?;

        let status = response.status();
        debug!(%field, status = status.as_u16(), "Field validation response");
        match status {
            StatusCode::OK => {
                let body: ApiResponse<FieldValidation> = response.json().await?;
                body.data
                    .map(ValidationVerdict::Valid)
                    .ok_or(ClientError::UnexpectedStatus(status.as_u16()))
            }
            StatusCode::BAD_REQUEST => {
                let body: ApiResponse<serde_json::Value> = response.json().await?;
                Ok(ValidationVerdict::Invalid(body.message))
            }
            other => Err(ClientError::UnexpectedStatus(other.as_u16())),
        }
    }
}

#[async_trait]
impl QuoteApi for QuoteApiClient {
    async fn submit_quote(
        &self,
        submission: &QuoteSubmission,
    ) -> Result<SubmitOutcome, ClientError> {
        let response = self
            .http
            .post(self.url("/quotes"))
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Quote submission response");
        if status == StatusCode::CREATED {
            let body: ApiResponse<Quote> = response.json().await?;
            return body
                .data
                .map(SubmitOutcome::Created)
                .ok_or(ClientError::UnexpectedStatus(status.as_u16()));
        }

        // Error bodies are best effort; a proxy may answer with HTML.
        let message = response
            .json::<ApiResponse<serde_json::Value>>()
            .await
            .map_or_else(|_| INTERNAL_ERROR_MESSAGE.to_string(), |body| body.message);

        Ok(match status {
            StatusCode::BAD_REQUEST => SubmitOutcome::Invalid(message),
            StatusCode::CONFLICT => SubmitOutcome::Conflict(message),
            _ => SubmitOutcome::Failed(message),
        })
    }
}
