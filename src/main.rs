//! Game server manager.
//!
//! # Startup Sequence
//!
//! ```text
//!   args ──▶ options ──▶ logging ──▶ server dir ──▶ DatabaseOptions.json
//!                                                          │
//!                                                          ▼
//!                                                    access gate
//!                                                          │ Allow
//!                                                          ▼
//!                                 data API (127.0.0.1:dbPort) + web panel (:webPort)
//!                                                          │
//!                                                          ▼
//!                                       idle ──SIGINT/SIGTERM──▶ stop both (once)
//! ```
//!
//! Any failure before idling exits with code 255.

use std::process::ExitCode;

use clap::error::ErrorKind;

use server_manager::access::{default_gate_address, AccessRequest};
use server_manager::error::BootstrapError;
use server_manager::observability::logging::{self, LogSettings};
use server_manager::{Bootstrapper, ProcessOptions};

#[tokio::main]
async fn main() -> ExitCode {
    let options = match ProcessOptions::load(std::env::args_os()) {
        Ok(options) => options,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(BootstrapError::Configuration(e.to_string()).exit_code()),
            };
        }
    };

    let service_dir = AccessRequest::current_service_dir();
    logging::init(&LogSettings::new(!options.no_logs, options.debug, &service_dir));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "server-manager starting");

    let bootstrapper = match Bootstrapper::for_address(default_gate_address()) {
        Ok(bootstrapper) => bootstrapper.with_service_dir(service_dir),
        Err(e) => {
            e.log_fatal();
            return ExitCode::from(e.exit_code());
        }
    };

    match bootstrapper.run(&options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code()),
    }
}
