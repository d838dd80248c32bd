//! Ownership of the two long-lived services.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::services::handle::DRAIN_TIMEOUT;
use crate::services::{data_api, web_panel, ServiceError, ServiceHandle, WebPanel};

/// Owns the data API and web panel handles.
///
/// Each service may be started once; stopping is always safe.
#[derive(Debug)]
pub struct ServiceSupervisor {
    data_api: Option<ServiceHandle>,
    web_panel: Option<ServiceHandle>,
    drain_timeout: Duration,
}

impl Default for ServiceSupervisor {
    fn default() -> Self {
        Self {
            data_api: None,
            web_panel: None,
            drain_timeout: DRAIN_TIMEOUT,
        }
    }
}

impl ServiceSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound on how long each stop waits for open connections.
    pub fn set_drain_timeout(&mut self, drain: Duration) {
        self.drain_timeout = drain;
    }

    /// Start the data-access API on `port`.
    pub async fn start_data_service(&mut self, port: u16) -> Result<&ServiceHandle, ServiceError> {
        if self.data_api.is_some() {
            return Err(ServiceError::AlreadyStarted(data_api::SERVICE_NAME));
        }
        let handle = data_api::start(port).await?;
        tracing::info!("Database server listening on port: {}", port);
        Ok(self.data_api.insert(handle))
    }

    /// Start the admin web panel for `server_dir` on `port`.
    pub async fn start_admin_panel(
        &mut self,
        server_dir: &Path,
        port: u16,
    ) -> Result<&ServiceHandle, ServiceError> {
        if self.web_panel.is_some() {
            return Err(ServiceError::AlreadyStarted(web_panel::SERVICE_NAME));
        }
        let handle = WebPanel::new(server_dir).start(port).await?;
        Ok(self.web_panel.insert(handle))
    }

    pub async fn stop_data_service(&mut self) {
        if let Some(handle) = self.data_api.as_mut() {
            handle.stop_within(self.drain_timeout).await;
        }
    }

    pub async fn stop_admin_panel(&mut self) {
        if let Some(handle) = self.web_panel.as_mut() {
            handle.stop_within(self.drain_timeout).await;
        }
    }

    /// Stop both services. Each stop is attempted regardless of the other.
    pub async fn stop_all(&mut self) {
        self.stop_data_service().await;
        self.stop_admin_panel().await;
    }

    pub fn data_service_addr(&self) -> Option<SocketAddr> {
        self.data_api.as_ref().map(ServiceHandle::local_addr)
    }

    pub fn admin_panel_addr(&self) -> Option<SocketAddr> {
        self.web_panel.as_ref().map(ServiceHandle::local_addr)
    }

    /// True while at least one service is accepting connections.
    pub fn is_running(&self) -> bool {
        self.data_api.iter().chain(self.web_panel.iter()).any(ServiceHandle::is_running)
    }
}
