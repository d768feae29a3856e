//! Server startup and wiring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::response::Response;
use http::header::HeaderName;
use http::{Request, StatusCode};
use quote_core::AppError;
use quote_db::{Database, DbConfig, InMemoryQuoteStore, QuoteStore, create_pool};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

use crate::config::Config;
use crate::middleware::{MetricsLayer, REQUEST_ID_HEADER, RequestId, RequestIdLayer};
use crate::routes::rest_routes;
use crate::services::QuoteService;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub quotes: QuoteService,
    /// Attach internal error detail to 5xx bodies.
    pub expose_error_details: bool,
}

impl AppState {
    #[must_use]
    pub const fn new(quotes: QuoteService, expose_error_details: bool) -> Self {
        Self {
            quotes,
            expose_error_details,
        }
    }

    /// Render an error with this deployment's detail policy.
    #[must_use]
    pub fn error_response(&self, error: AppError) -> Response {
        error.into_response_with_detail(self.expose_error_details)
    }
}

/// Build and configure the complete application.
pub async fn build_app(config: &Config) -> anyhow::Result<(Router, SocketAddr)> {
    let addr = config.http_address()?;
    let rules = Arc::new(config.validation_rules()?);
    let store = init_store(config).await?;

    let state = AppState::new(QuoteService::new(store, rules), config.expose_error_details());

    let router = rest_routes(state);
    #[cfg(feature = "prometheus")]
    let router = crate::routes::with_metrics(router, quote_telemetry::init_metrics()?);

    let cors = build_cors(config.cors_allow_origins.as_deref());
    let app = apply_middleware(router, cors, config.request_timeout());

    Ok((app, addr))
}

/// Routes plus the standard middleware stack, without process-wide setup.
pub fn app(state: AppState) -> Router {
    apply_middleware(
        rest_routes(state),
        CorsLayer::permissive(),
        DEFAULT_REQUEST_TIMEOUT,
    )
}

async fn init_store(config: &Config) -> anyhow::Result<Arc<dyn QuoteStore>> {
    let Some(url) = config.database_url() else {
        warn!("DB_URL not set, using in-memory quote store");
        return Ok(Arc::new(InMemoryQuoteStore::new()));
    };

    let db_config = DbConfig::new(
        url,
        config.db_pool_min,
        config.db_pool_max,
        config.db_connect_timeout(),
    );
    let pool = create_pool(&db_config).await?;
    info!("Connected to database");
    let database = Database::new(pool);

    if config.db_run_migrations {
        database.migrate().await?;
    }

    Ok(Arc::new(database.quotes))
}

/// Wrap `router` in the middleware stack (executes top-to-bottom on request).
fn apply_middleware(router: Router, cors: CorsLayer, request_timeout: Duration) -> Router {
    let middleware = ServiceBuilder::new()
        // 1. Request ID - generate/propagate first
        .layer(RequestIdLayer::new())
        // 2. Tracing - span carries the request id set above
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .extensions()
                        .get::<RequestId>()
                        .map_or("", RequestId::as_str);
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        // 3. Metrics - count and time every request
        .layer(MetricsLayer::new())
        // 4. Timeout - prevent hung requests
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        // 5. CORS - answer preflight before routing
        .layer(cors);

    router.layer(middleware)
}

fn build_cors(origins: Option<&str>) -> CorsLayer {
    let cors = match origins {
        Some(o) if o.trim() == "*" => CorsLayer::permissive(),
        Some(o) => {
            let origins: Vec<_> = o.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            CorsLayer::new().allow_origin(origins)
        }
        None => CorsLayer::permissive(),
    };

    cors.allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_methods(Any)
        .max_age(Duration::from_secs(3600))
}
