//! Middleware shared by both service routers.

use std::time::Duration;

use axum::http::{HeaderValue, Request};
use axum::Router;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Per-request deadline for the built-in endpoints.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Generates a UUID v4 `x-request-id` for requests that lack one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Wrap a router with request IDs, tracing and a request timeout.
#[allow(deprecated)]
pub fn apply(router: Router) -> Router {
    router
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
