//! Network-facing services owned by the manager.
//!
//! # Data Flow
//! ```text
//! ServiceSupervisor
//!     → data_api.rs   (127.0.0.1:<dbPort>)  ┐
//!     → web_panel.rs  (0.0.0.0:<webPort>)   ├─ each runs its own accept loop
//!                                           ┘
//!     → ServiceHandle per service (stop signal + serve task)
//! ```
//!
//! # Design Decisions
//! - Services share no mutable state with each other
//! - Stopping drops the listener before returning, so the port is free afterwards
//! - A service can be started at most once per process

pub mod data_api;
pub mod handle;
pub mod middleware;
pub mod supervisor;
pub mod web_panel;

use std::net::SocketAddr;

pub use handle::ServiceHandle;
pub use supervisor::ServiceSupervisor;
pub use web_panel::WebPanel;

/// Error type for service lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Listener could not be bound.
    #[error("{service} failed to bind {addr}: {source}")]
    Bind {
        service: &'static str,
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Start was requested for a service that has already been started once.
    #[error("{0} has already been started")]
    AlreadyStarted(&'static str),
}
