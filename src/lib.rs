//! Game server manager library.
//!
//! Validates the server installation, passes a remote access check, then runs
//! the data-access API and the admin web panel until a termination signal.

pub mod access;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod services;

pub use access::AccessGate;
pub use config::ProcessOptions;
pub use error::BootstrapError;
pub use lifecycle::{Bootstrapper, Shutdown, ShutdownCoordinator};
pub use services::ServiceSupervisor;
