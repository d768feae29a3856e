//! REST routes and health check handlers.

use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use quote_core::ApiResponse;
use serde::Serialize;

use crate::services::quotes::{submit_quote, validate_field};
use crate::startup::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    checks: Option<HealthChecks>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    store: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResult {
    const fn healthy() -> Self {
        Self {
            status: "healthy",
            message: None,
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: "unhealthy",
            message: Some(message.into()),
        }
    }
}

/// Build version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build REST routes with the given application state.
pub fn rest_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "quote-service" }))
        .route("/health", get(|| async { "OK" }))
        .route("/health/live", get(|| async { "OK" }))
        .route("/health/ready", get(readiness_handler))
        .route("/quotes", post(submit_quote).fallback(method_not_allowed))
        .route("/validate", post(validate_field).fallback(method_not_allowed))
        .with_state(state)
}

/// Add the Prometheus scrape endpoint.
#[cfg(feature = "prometheus")]
pub fn with_metrics(router: Router, metrics_handle: quote_telemetry::PrometheusHandle) -> Router {
    router.route(
        "/metrics",
        get(move || {
            let handle = metrics_handle.clone();
            async move { handle.render() }
        }),
    )
}

/// 405 for anything but POST on the quote endpoints.
async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ApiResponse::<()>::failure(format!(
            "Method {method} Not Allowed"
        ))),
    )
        .into_response()
}

async fn readiness_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_check = if state.quotes.store_ready().await {
        CheckResult::healthy()
    } else {
        CheckResult::unhealthy("Quote store unavailable")
    };

    let healthy = store_check.status == "healthy";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" },
            version: VERSION,
            checks: Some(HealthChecks { store: store_check }),
        }),
    )
}
