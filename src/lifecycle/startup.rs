//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the server directory and load database options
//! - Pass the access gate before anything binds
//! - Start the data API, then the web panel
//! - Hand the running services to the shutdown coordinator and idle
//!
//! # Design Decisions
//! - Fail fast: every startup error is fatal and maps to exit code 255
//! - Steps run strictly in order on the calling task
//! - A failed web panel start stops the already-running data API

use std::path::PathBuf;

use crate::access::{AccessDecision, AccessGate, AccessRequest};
use crate::config::{self, DatabaseConfig, ProcessOptions};
use crate::error::BootstrapError;
use crate::lifecycle::{signals, ShutdownCoordinator};
use crate::services::ServiceSupervisor;

/// Drives the startup sequence.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    gate: AccessGate,
    service_dir: PathBuf,
}

impl Bootstrapper {
    pub fn new(gate: AccessGate) -> Self {
        Self {
            gate,
            service_dir: AccessRequest::current_service_dir(),
        }
    }

    /// Bootstrapper checking access against the gate at `address`.
    ///
    /// A gate client that cannot be built fails closed like a denial.
    pub fn for_address(address: &str) -> Result<Self, BootstrapError> {
        let gate = AccessGate::new(address)
            .map_err(|e| BootstrapError::AccessDenied(format!("gate client unavailable: {}", e)))?;
        Ok(Self::new(gate))
    }

    /// Override the installation directory reported to the gate.
    pub fn with_service_dir(mut self, service_dir: impl Into<PathBuf>) -> Self {
        self.service_dir = service_dir.into();
        self
    }

    /// Run every step up to and including starting both services.
    pub async fn start(&self, options: &ProcessOptions) -> Result<ServiceSupervisor, BootstrapError> {
        let server_dir = &options.server_dir;

        let options_path = config::validate_layout(server_dir)?;
        let database = config::load_database_config_at(&options_path)?;

        tracing::info!(
            server_dir = %server_dir.display(),
            database_port = database.database_server_port,
            web_port = options.web_port,
            "Configuration loaded"
        );

        self.check_access(options, &database).await?;

        let mut supervisor = ServiceSupervisor::new();
        supervisor
            .start_data_service(database.database_server_port)
            .await?;

        let panel = supervisor
            .start_admin_panel(server_dir, options.web_port)
            .await
            .map(|_| ());
        if let Err(e) = panel {
            supervisor.stop_all().await;
            return Err(e.into());
        }

        Ok(supervisor)
    }

    async fn check_access(
        &self,
        options: &ProcessOptions,
        database: &DatabaseConfig,
    ) -> Result<(), BootstrapError> {
        let request = AccessRequest {
            service_dir: self.service_dir.clone(),
            dayz_dir: options.server_dir.clone(),
            db_port: database.database_server_port,
            web_port: options.web_port,
        };

        match self.gate.check(&request).await {
            AccessDecision::Allow => {
                tracing::debug!(gate = %self.gate.address(), "Access granted");
                Ok(())
            }
            AccessDecision::Deny(reason) => Err(BootstrapError::AccessDenied(reason)),
        }
    }

    /// Start everything, then idle until a termination signal stops it.
    ///
    /// A startup failure is logged once as fatal before being returned.
    pub async fn run(&self, options: &ProcessOptions) -> Result<(), BootstrapError> {
        let supervisor = match self.start(options).await {
            Ok(supervisor) => supervisor,
            Err(e) => {
                e.log_fatal();
                return Err(e);
            }
        };

        let coordinator = ShutdownCoordinator::new(supervisor);
        let signal_task = signals::install(coordinator.signal());

        coordinator.wait().await;
        signal_task.abort();
        Ok(())
    }
}
