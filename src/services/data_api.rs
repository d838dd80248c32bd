//! Data-access API listener.
//!
//! The endpoint set belongs to the database subsystem; this module owns only
//! the listener and a liveness route.

use std::net::{Ipv4Addr, SocketAddr};

use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::services::{middleware, ServiceError, ServiceHandle};

pub const SERVICE_NAME: &str = "data-api";

pub fn router() -> Router {
    middleware::apply(Router::new().route("/health", get(health)))
}

async fn health() -> &'static str {
    "OK"
}

/// Bind the data API on loopback and start serving.
pub async fn start(port: u16) -> Result<ServiceHandle, ServiceError> {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let bind_err = |source: std::io::Error| ServiceError::Bind {
        service: SERVICE_NAME,
        addr,
        source,
    };

    let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
    ServiceHandle::spawn(SERVICE_NAME, listener, router()).map_err(bind_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let res = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bind_conflict() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        assert!(matches!(start(port).await, Err(ServiceError::Bind { .. })));
    }
}
