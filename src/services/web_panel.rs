//! Administrative web panel listener.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::services::{middleware, ServiceError, ServiceHandle};

pub const SERVICE_NAME: &str = "web-panel";

/// Web panel scoped to one game-server directory.
#[derive(Debug, Clone)]
pub struct WebPanel {
    server_dir: Arc<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct PanelStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub server_dir: String,
}

impl WebPanel {
    pub fn new(server_dir: impl Into<PathBuf>) -> Self {
        Self {
            server_dir: Arc::new(server_dir.into()),
        }
    }

    pub fn server_dir(&self) -> &Path {
        &self.server_dir
    }

    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/", get(index))
            .route("/api/status", get(status))
            .with_state(self.clone());
        middleware::apply(routes)
    }

    /// Bind the panel on all interfaces and start serving.
    pub async fn start(&self, port: u16) -> Result<ServiceHandle, ServiceError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let bind_err = |source: std::io::Error| ServiceError::Bind {
            service: SERVICE_NAME,
            addr,
            source,
        };

        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let handle = ServiceHandle::spawn(SERVICE_NAME, listener, self.router()).map_err(bind_err)?;

        tracing::info!(
            port,
            server_dir = %self.server_dir.display(),
            "Web panel listening"
        );
        Ok(handle)
    }
}

async fn index(State(panel): State<WebPanel>) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><head><title>Server Manager</title></head>\
         <body><h1>Server Manager</h1><p>Server directory: {}</p></body></html>",
        escape_html(&panel.server_dir.display().to_string())
    ))
}

async fn status(State(panel): State<WebPanel>) -> Json<PanelStatus> {
    Json(PanelStatus {
        status: "operational",
        version: env!("CARGO_PKG_VERSION"),
        server_dir: panel.server_dir.display().to_string(),
    })
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
