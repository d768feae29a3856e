//! Tower middleware shared by every REST endpoint.
//!
//! # Middleware Order
//! Middleware is applied in layers. When using `.layer()` on a router:
//! - Outermost layer is added last
//! - Request flows: outermost → innermost → handler
//! - Response flows: handler → innermost → outermost
//!
//! Order used by `startup` (outermost first):
//! 1. RequestIdLayer - Extract/generate request ID first
//! 2. TraceLayer - Request span carrying the request ID
//! 3. MetricsLayer - Request count and latency
//! 4. TimeoutLayer - Request timeout
//! 5. CorsLayer - CORS handling

pub mod metrics;
pub mod request_id;

pub use metrics::MetricsLayer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
